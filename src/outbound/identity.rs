use crate::core::config::IdentityConfig;
use crate::domain::auth::{IdentityError, IdentityPort, IdentityVerifyParams, IdentityVerifyResult};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    KeyError(#[from] jsonwebtoken::errors::Error),

    #[error("identity config needs exactly one of public_key_pem or shared_secret")]
    MissingKey,
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: Option<String>,
    sid: Option<String>,
}

/// Verifies identity-provider session tokens locally against a configured key.
pub struct JwtIdentityAdapter {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityAdapter {
    pub fn new(config: &IdentityConfig) -> Result<Self, Error> {
        let (decoding_key, algorithm) =
            match (&config.public_key_pem, &config.shared_secret) {
                (Some(pem), None) => (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256),
                (None, Some(secret)) => {
                    (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
                }
                _ => return Err(Error::MissingKey),
            };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_aud = config.audience.is_some();

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
        }

        tracing::debug!(
            algorithm = ?algorithm,
            issuer = ?config.issuer,
            audience = ?config.audience,
            "identity adapter configured"
        );

        Ok(Self {
            decoding_key,
            validation,
        })
    }
}

#[async_trait]
impl IdentityPort for JwtIdentityAdapter {
    async fn verify(
        &self,
        params: IdentityVerifyParams,
    ) -> Result<IdentityVerifyResult, IdentityError> {
        let token = decode::<SessionClaims>(&params.token, &self.decoding_key, &self.validation)
            .map_err(|e| IdentityError::Verification(e.to_string()))?;

        let subject = token
            .claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(IdentityError::MissingSubject)?;

        Ok(IdentityVerifyResult {
            subject,
            session_id: token.claims.sid,
        })
    }
}
