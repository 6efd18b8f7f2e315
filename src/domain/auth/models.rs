use serde::{Deserialize, Serialize};

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub session_id: Option<String>,
}
