use crate::domain::auth::{
    AuthService, AuthenticatedUser, IdentityPort, IdentityVerifyParams, ServiceAuthenticateError,
    ServiceAuthenticateParams,
};
use async_trait::async_trait;
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";
const MIN_TOKEN_LEN: usize = 10;
const PLACEHOLDER_TOKENS: [&str; 3] = ["missing", "null", "undefined"];

#[derive(Debug, Clone)]
pub struct Service<IDENTITY>
where
    IDENTITY: IdentityPort + Send + Sync + 'static,
{
    identity_adapter: Arc<IDENTITY>,
}

impl<IDENTITY> Service<IDENTITY>
where
    IDENTITY: IdentityPort + Send + Sync + 'static,
{
    pub fn new(identity_adapter: IDENTITY) -> Self {
        Self {
            identity_adapter: Arc::new(identity_adapter),
        }
    }
}

/// Pulls a plausible bearer token out of an `Authorization` header value.
fn bearer_token(authorization: Option<&str>) -> Result<&str, ServiceAuthenticateError> {
    let header = authorization.ok_or(ServiceAuthenticateError::MissingCredentials)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(ServiceAuthenticateError::InvalidHeaderFormat)?;

    if PLACEHOLDER_TOKENS.contains(&token) || token.len() < MIN_TOKEN_LEN {
        return Err(ServiceAuthenticateError::InvalidToken);
    }

    Ok(token)
}

#[async_trait]
impl<IDENTITY> AuthService for Service<IDENTITY>
where
    IDENTITY: IdentityPort + Send + Sync + 'static,
{
    async fn authenticate(
        &self,
        params: ServiceAuthenticateParams,
    ) -> Result<AuthenticatedUser, ServiceAuthenticateError> {
        let token = bearer_token(params.authorization.as_deref()).inspect_err(|e| {
            tracing::debug!(error = %e, "rejected authorization header");
        })?;

        let verified = self
            .identity_adapter
            .verify(IdentityVerifyParams {
                token: token.to_string(),
            })
            .await
            .inspect_err(|e| tracing::info!(error = %e, "bearer token rejected"))?;

        Ok(AuthenticatedUser {
            user_id: verified.subject,
            session_id: verified.session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::{IdentityError, IdentityVerifyResult, MockIdentityPort};
    use std::future;

    fn service_without_verification() -> Service<MockIdentityPort> {
        let mut identity_adapter = MockIdentityPort::new();
        identity_adapter.expect_verify().times(0);
        Service::new(identity_adapter)
    }

    async fn authenticate(
        service: &Service<MockIdentityPort>,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedUser, ServiceAuthenticateError> {
        service
            .authenticate(ServiceAuthenticateParams {
                authorization: authorization.map(str::to_string),
            })
            .await
    }

    #[tokio::test]
    async fn test_authenticate_missing_header() {
        let service = service_without_verification();

        let result = authenticate(&service, None).await;

        assert!(matches!(
            result,
            Err(ServiceAuthenticateError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_scheme() {
        let service = service_without_verification();

        let result = authenticate(&service, Some("Basic dXNlcjpwYXNzd29yZA==")).await;

        assert!(matches!(
            result,
            Err(ServiceAuthenticateError::InvalidHeaderFormat)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_placeholder_tokens() {
        let service = service_without_verification();

        for token in ["missing", "null", "undefined"] {
            let result = authenticate(&service, Some(&format!("Bearer {token}"))).await;

            assert!(matches!(result, Err(ServiceAuthenticateError::InvalidToken)));
        }
    }

    #[tokio::test]
    async fn test_authenticate_short_token() {
        let service = service_without_verification();

        let result = authenticate(&service, Some("Bearer abc123")).await;

        assert!(matches!(result, Err(ServiceAuthenticateError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_authenticate_rejected_token() {
        let mut identity_adapter = MockIdentityPort::new();
        identity_adapter.expect_verify().times(1).returning(|_| {
            Box::pin(future::ready(Err(IdentityError::Verification(
                "ExpiredSignature".to_string(),
            ))))
        });
        let service = Service::new(identity_adapter);

        let result = authenticate(&service, Some("Bearer eyJhbGciOiJIUzI1NiJ9.expired")).await;

        assert!(matches!(result, Err(ServiceAuthenticateError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let mut identity_adapter = MockIdentityPort::new();
        identity_adapter
            .expect_verify()
            .times(1)
            .withf(|params| params.token == "eyJhbGciOiJIUzI1NiJ9.valid")
            .returning(|_| {
                Box::pin(future::ready(Ok(IdentityVerifyResult {
                    subject: "user_1".to_string(),
                    session_id: Some("sess_1".to_string()),
                })))
            });
        let service = Service::new(identity_adapter);

        let user = authenticate(&service, Some("Bearer eyJhbGciOiJIUzI1NiJ9.valid"))
            .await
            .unwrap();

        assert_eq!("user_1", user.user_id);
        assert_eq!(Some("sess_1".to_string()), user.session_id);
    }
}
