use crate::core::application::ApplicationServices;
use crate::errors::{AppError, not_found};
use crate::inbound::http::handlers::{
    insights, integrations, pulse, server_health, teams, vault,
};
use crate::inbound::http::middleware::auth;
use axum::Router;
use axum::extract::{MatchedPath, Request};
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post};
use http::header::{ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method, StatusCode};
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn router<APP>(application: APP) -> Router
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    let config = application.config();

    let hosts: Vec<HeaderValue> = config
        .cors_hosts
        .iter()
        .filter_map(|host| {
            host.parse::<HeaderValue>()
                .inspect_err(|_| tracing::warn!(host = %host, "ignoring invalid cors host"))
                .ok()
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![
            ORIGIN,
            AUTHORIZATION,
            ACCEPT,
            CONTENT_TYPE,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        ])
        .allow_origin(hosts)
        .allow_credentials(true);

    let api_routes = api_routes(application.clone());

    Router::new()
        .route("/health", get(server_health::<APP>))
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(cors)
        .layer((
            SetSensitiveHeadersLayer::new([AUTHORIZATION]),
            CompressionLayer::new(),
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                .on_failure(()),
            TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                Duration::from_secs(config.request_timeout_secs),
            ),
            CatchPanicLayer::new(),
        ))
        .with_state(application)
}

async fn route_not_found() -> AppError {
    not_found("route")
}

fn api_routes<APP>(application: APP) -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .nest("/teams", team_routes::<APP>())
        .nest("/integrations", integration_routes::<APP>())
        .nest("/insights", insight_routes::<APP>())
        .nest("/pulse", pulse_routes::<APP>())
        .nest("/vault", vault_routes::<APP>())
        .route_layer(from_fn_with_state(application, auth::<APP>))
}

fn team_routes<APP>() -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(teams::list_teams::<APP>).post(teams::create_team::<APP>),
        )
        .route(
            "/{team_id}",
            get(teams::get_team::<APP>)
                .patch(teams::update_team::<APP>)
                .delete(teams::delete_team::<APP>),
        )
        .route(
            "/{team_id}/members",
            get(teams::list_members::<APP>).post(teams::add_member::<APP>),
        )
        .route(
            "/{team_id}/members/{user_id}",
            delete(teams::remove_member::<APP>),
        )
}

fn integration_routes<APP>() -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/{team_id}",
            get(integrations::list_integrations::<APP>),
        )
        .route(
            "/{team_id}/{integration}",
            get(integrations::get_integration::<APP>)
                .patch(integrations::update_integration::<APP>)
                .delete(integrations::delete_integration::<APP>)
                .post(integrations::configure_integration::<APP>),
        )
}

fn insight_routes<APP>() -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/{team_id}",
            get(insights::list_insights::<APP>).post(insights::create_insight::<APP>),
        )
        .route(
            "/{team_id}/generate",
            post(insights::generate_all_insights::<APP>),
        )
        .route(
            "/{team_id}/generate/{source}",
            post(insights::generate_source_insights::<APP>),
        )
        .route(
            "/{team_id}/{insight_id}",
            get(insights::get_insight::<APP>)
                .patch(insights::update_insight_status::<APP>)
                .delete(insights::delete_insight::<APP>),
        )
        .route(
            "/{team_id}/{insight_id}/status",
            patch(insights::update_insight_status::<APP>),
        )
}

fn pulse_routes<APP>() -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route("/digests/{digest_id}", get(pulse::get_digest::<APP>))
        .route(
            "/teams/{team_id}/digests",
            get(pulse::list_team_digests::<APP>),
        )
        .route(
            "/teams/{team_id}/digests/latest",
            get(pulse::get_latest_digest::<APP>),
        )
        .route(
            "/teams/{team_id}/digests/{digest_type}",
            post(pulse::generate_digest::<APP>),
        )
        .route(
            "/teams/{team_id}/metrics",
            get(pulse::list_team_metrics::<APP>).post(pulse::record_team_metric::<APP>),
        )
}

fn vault_routes<APP>() -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/{team_id}/events",
            get(vault::list_events::<APP>).post(vault::create_event::<APP>),
        )
        .route(
            "/{team_id}/events/{event_id}",
            get(vault::get_event::<APP>).delete(vault::delete_event::<APP>),
        )
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::core::config::Config;
    use crate::domain::auth::{MockAuthService, ServiceAuthenticateError};
    use crate::domain::teams::MockTeamService;
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use std::future;

    #[tokio::test]
    async fn test_api_requires_authentication() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticate()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(ServiceAuthenticateError::MissingCredentials))));
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            auth_service: Some(auth_service),
            team_service: Some(MockTeamService::new()),
            ..Default::default()
        });
        let server = TestServer::new(router(app)).unwrap();

        let response = server.get("/api/teams").await;

        response.assert_status_unauthorized();
        let body: Value = response.json();
        assert_eq!(401, body["code"]);
    }

    #[tokio::test]
    async fn test_unknown_route_not_found_body() {
        let app = MockApplication::mock_instance(MockAppInstanceParameters::default());
        let server = TestServer::new(router(app)).unwrap();

        let response = server.get("/nowhere").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"code": 404, "error": "route not found"}));
    }

    #[tokio::test]
    async fn test_invalid_cors_host_is_skipped() {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            config: Some(Config {
                cors_hosts: vec!["http://localhost:3000".to_string(), "bad\nhost".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        });
        let server = TestServer::new(router(app)).unwrap();

        let response = server.get("/health").await;

        response.assert_status_ok();
    }
}
