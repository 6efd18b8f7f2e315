use astralith::core::application::{Application, ApplicationParts};
use astralith::core::config::{Config, IdentityConfig, Storage};
use astralith::domain::insights::default_analyzers;
use astralith::domain::{auth, insights, integrations, pulse, teams, vault};
use astralith::inbound::http::router;
use astralith::outbound::identity::JwtIdentityAdapter;
use astralith::outbound::memory::MemoryRepository;
use axum_test::TestServer;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use time::OffsetDateTime;

const SECRET: &str = "integration-test-secret";

fn server() -> TestServer {
    let config = Config {
        storage: Storage::Memory,
        identity: IdentityConfig {
            shared_secret: Some(SECRET.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let repo = MemoryRepository::new();
    let identity_adapter = JwtIdentityAdapter::new(&config.identity).unwrap();
    let insight_service = insights::Service::new(repo.clone(), repo.clone(), default_analyzers());

    let application = Application::new(
        config,
        ApplicationParts {
            auth_service: auth::Service::new(identity_adapter),
            team_service: teams::Service::new(repo.clone()),
            integration_service: integrations::Service::new(repo.clone()),
            insight_service: insight_service.clone(),
            pulse_service: pulse::Service::new(repo.clone(), insight_service),
            vault_service: vault::Service::new(repo),
        },
    );

    TestServer::new(router(application)).unwrap()
}

fn token(user_id: &str) -> String {
    let exp = OffsetDateTime::now_utc().unix_timestamp() + 3600;
    encode(
        &Header::default(),
        &json!({"sub": user_id, "sid": "sess_1", "exp": exp}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn create_team(server: &TestServer, jwt: &str, name: &str) -> String {
    let response = server
        .post("/api/teams")
        .authorization_bearer(jwt)
        .json(&json!({"name": name}))
        .await;
    response.assert_status(http::StatusCode::CREATED);

    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

async fn configure_slack(server: &TestServer, jwt: &str, team_id: &str) -> Value {
    let response = server
        .post(&format!("/api/integrations/{team_id}/slack"))
        .authorization_bearer(jwt)
        .json(&json!({"token": "xoxb-123456", "workspace": "acme"}))
        .await;
    response.assert_status(http::StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_api_rejects_missing_token() {
    let server = server();

    let response = server.get("/api/teams").await;

    response.assert_status_unauthorized();
    let body: Value = response.json();
    assert_eq!(401, body["code"]);
}

#[tokio::test]
async fn test_health_is_public() {
    let server = server();

    let response = server.get("/health").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_creator_becomes_admin_member() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;

    let response = server
        .get(&format!("/api/teams/{team_id}/members"))
        .authorization_bearer(&jwt)
        .await;

    response.assert_status_ok();
    let members: Vec<Value> = response.json();
    assert_eq!(1, members.len());
    assert_eq!("user_1", members[0]["userId"]);
    assert_eq!("admin", members[0]["role"]);
}

#[tokio::test]
async fn test_configuring_twice_keeps_one_integration() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;

    let first = configure_slack(&server, &jwt, &team_id).await;
    let second = configure_slack(&server, &jwt, &team_id).await;
    assert_eq!(first["id"], second["id"]);

    let response = server
        .get(&format!("/api/integrations/{team_id}"))
        .authorization_bearer(&jwt)
        .await;

    response.assert_status_ok();
    let integrations: Vec<Value> = response.json();
    assert_eq!(1, integrations.len());
    assert_eq!("slack", integrations[0]["type"]);
    assert_eq!(true, integrations[0]["active"]);
}

#[tokio::test]
async fn test_generate_from_slack() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;
    configure_slack(&server, &jwt, &team_id).await;

    let response = server
        .post(&format!("/api/insights/{team_id}/generate/slack"))
        .authorization_bearer(&jwt)
        .await;

    response.assert_status(http::StatusCode::CREATED);
    let insights: Vec<Value> = response.json();
    assert_eq!(2, insights.len());
    assert!(insights.iter().all(|insight| insight["source"] == "slack"));
    assert!(insights.iter().all(|insight| insight["status"] == "active"));
}

#[tokio::test]
async fn test_generate_without_integrations_is_empty() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Quiet").await;

    let response = server
        .post(&format!("/api/insights/{team_id}/generate"))
        .authorization_bearer(&jwt)
        .await;

    response.assert_status(http::StatusCode::CREATED);
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_daily_digest_buckets_active_insights() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;
    configure_slack(&server, &jwt, &team_id).await;

    let response = server
        .post(&format!("/api/pulse/teams/{team_id}/digests/daily"))
        .authorization_bearer(&jwt)
        .await;
    response.assert_status(http::StatusCode::CREATED);
    let body: Value = response.json();
    let digest = &body["digest"];
    assert_eq!("daily", digest["type"]);

    let response = server
        .get(&format!("/api/insights/{team_id}"))
        .authorization_bearer(&jwt)
        .await;
    let insights: Vec<Value> = response.json();
    let active = insights
        .iter()
        .filter(|insight| insight["status"] == "active")
        .count();

    let bucketed: usize = ["high", "medium", "low"]
        .iter()
        .map(|bucket| digest["insights"][bucket].as_array().map_or(0, Vec::len))
        .sum();
    assert!(active > 0);
    assert_eq!(active, bucketed);

    let response = server
        .get(&format!("/api/pulse/teams/{team_id}/digests/latest"))
        .authorization_bearer(&jwt)
        .add_query_param("type", "daily")
        .await;
    response.assert_status_ok();
    let latest: Value = response.json();
    assert_eq!(digest["id"], latest["digest"]["id"]);
}

#[tokio::test]
async fn test_zero_limit_lists_no_digests() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;

    let response = server
        .get(&format!("/api/pulse/teams/{team_id}/digests"))
        .authorization_bearer(&jwt)
        .add_query_param("limit", 0)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"digests": []}));
}

#[tokio::test]
async fn test_deleting_team_removes_its_events() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;

    let response = server
        .post(&format!("/api/vault/{team_id}/events"))
        .authorization_bearer(&jwt)
        .json(&json!({"type": "milestone", "title": "Launch", "date": "2024-05-13"}))
        .await;
    response.assert_status(http::StatusCode::CREATED);

    server
        .delete(&format!("/api/teams/{team_id}"))
        .authorization_bearer(&jwt)
        .await
        .assert_status_ok();

    let response = server
        .get(&format!("/api/vault/{team_id}/events"))
        .authorization_bearer(&jwt)
        .await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_created_insight_reads_back_unchanged() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;

    let response = server
        .post(&format!("/api/insights/{team_id}"))
        .authorization_bearer(&jwt)
        .json(&json!({
            "title": "Review load is uneven",
            "description": "Two reviewers handle most pull requests.",
            "type": "bottleneck",
            "priority": "high"
        }))
        .await;
    response.assert_status(http::StatusCode::CREATED);
    let created: Value = response.json();
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(team_id, created["teamId"]);
    assert_eq!("active", created["status"]);
    assert_eq!("system", created["source"]);
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let id = created["id"].as_str().unwrap();
    let response = server
        .get(&format!("/api/insights/{team_id}/{id}"))
        .authorization_bearer(&jwt)
        .await;

    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(created, fetched);
}

#[tokio::test]
async fn test_weekly_digest_averages_recorded_metrics() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;

    for (date, collaboration) in [("2024-05-13", 70), ("2024-05-14", 90)] {
        let response = server
            .post(&format!("/api/pulse/teams/{team_id}/metrics"))
            .authorization_bearer(&jwt)
            .json(&json!({
                "date": date,
                "collaborationScore": collaboration,
                "productivityScore": 85,
                "moraleScore": 80,
                "wellnessScore": 60
            }))
            .await;
        response.assert_status(http::StatusCode::CREATED);
    }

    let response = server
        .post(&format!("/api/insights/{team_id}"))
        .authorization_bearer(&jwt)
        .json(&json!({"title": "Retention risk", "type": "burnout", "priority": "high"}))
        .await;
    let insight: Value = response.json();

    let response = server
        .post(&format!("/api/pulse/teams/{team_id}/digests/weekly"))
        .authorization_bearer(&jwt)
        .add_query_param("date", "2024-05-16")
        .await;

    response.assert_status(http::StatusCode::CREATED);
    let body: Value = response.json();
    let digest = &body["digest"];
    assert_eq!("weekly", digest["type"]);
    assert_eq!(80, digest["metrics"]["collaborationScore"]);
    assert_eq!(85, digest["metrics"]["productivityScore"]);
    assert_eq!("strong", digest["metrics"]["weeklyTrends"]["productivity"]);
    assert_eq!(
        "needs improvement",
        digest["metrics"]["weeklyTrends"]["collaboration"]
    );
    assert_eq!(json!([insight["id"]]), digest["insights"]["high"]);
}

#[tokio::test]
async fn test_member_routes_round_trip() {
    let server = server();
    let jwt = token("user_1");
    let team_id = create_team(&server, &jwt, "Platform").await;

    let response = server
        .post(&format!("/api/teams/{team_id}/members"))
        .authorization_bearer(&jwt)
        .json(&json!({"userId": "user_2"}))
        .await;
    response.assert_status(http::StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!("member", body["role"]);

    let response = server
        .get(&format!("/api/teams/{team_id}"))
        .authorization_bearer(&jwt)
        .await;
    response.assert_status_ok();

    let response = server
        .delete(&format!("/api/teams/{team_id}/members/user_2"))
        .authorization_bearer(&jwt)
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"success": true}));

    let response = server
        .get(&format!("/api/teams/{team_id}/members"))
        .authorization_bearer(&jwt)
        .await;
    let members: Vec<Value> = response.json();
    assert_eq!(1, members.len());
}
