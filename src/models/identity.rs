use serde::{Deserialize, Serialize};

/// The caller as known to the BaaS auth service. Never persisted by this API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// Result of a sign-up or sign-in against the auth endpoint.
///
/// Sign-up with e-mail confirmation enabled yields a user but no token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: Option<String>,
    pub user: Identity,
}
