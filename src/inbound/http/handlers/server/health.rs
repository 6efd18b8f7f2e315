use crate::core::application::ApplicationServices;
use crate::inbound::http::responses::health::HealthResponse;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe. Reports which storage backend the process was started with.
pub async fn server_health<S: ApplicationServices>(State(state): State<S>) -> impl IntoResponse {
    let response = HealthResponse::ok(state.config().storage);

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::core::config::{Config, Storage};
    use crate::domain::auth::MockAuthService;
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_server_health() {
        let app = MockApplication::mock_instance(MockAppInstanceParameters::default());
        let server = TestServer::new(router(app)).unwrap();

        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "data": {"status": "OK", "storage": "postgres"},
            "type": "health"
        }));
    }

    #[tokio::test]
    async fn test_server_health_reports_memory_storage() {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            config: Some(Config {
                storage: Storage::Memory,
                ..Default::default()
            }),
            ..Default::default()
        });
        let server = TestServer::new(router(app)).unwrap();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!("memory", body["data"]["storage"]);
    }

    #[tokio::test]
    async fn test_server_health_skips_auth() {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            auth_service: Some(MockAuthService::new()),
            ..Default::default()
        });
        let server = TestServer::new(router(app)).unwrap();

        let response = server.get("/health").await;

        response.assert_status_ok();
    }
}
