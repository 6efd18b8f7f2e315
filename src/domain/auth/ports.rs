use crate::domain::auth::AuthenticatedUser;
use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    async fn authenticate(
        &self,
        params: ServiceAuthenticateParams,
    ) -> Result<AuthenticatedUser, ServiceAuthenticateError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Verifies bearer tokens issued by the identity provider.
#[async_trait]
#[automock]
pub trait IdentityPort: Send + Sync {
    async fn verify(&self, params: IdentityVerifyParams)
    -> Result<IdentityVerifyResult, IdentityError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Results
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct IdentityVerifyResult {
    pub subject: String,
    pub session_id: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ServiceAuthenticateParams {
    /// Raw value of the `Authorization` header, if the request carried one.
    pub authorization: Option<String>,
}

pub struct IdentityVerifyParams {
    pub token: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum ServiceAuthenticateError {
    #[error("missing authorization header")]
    MissingCredentials,

    #[error("authorization header must use the Bearer scheme")]
    InvalidHeaderFormat,

    #[error("invalid bearer token")]
    InvalidToken,

    #[error("token rejected by identity provider")]
    Rejected(#[from] IdentityError),
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("token verification failed: {0}")]
    Verification(String),

    #[error("token has no subject")]
    MissingSubject,
}
