use serde::Serialize;

use super::claims::ClaimsSet;

/// Name of the verified-claims slot.
pub const JWT_PAYLOAD: &str = "JWT_PAYLOAD";
/// Name of the verified raw-token slot.
pub const JWT_TOKEN: &str = "JWT_TOKEN";

/// Per-request context written by the gate and read by handlers.
///
/// The gate builds a fresh value for every request and puts it into the
/// request extensions once verification succeeded. Only the gate fills the two
/// slots; handlers get read access.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestState {
    #[serde(rename = "JWT_PAYLOAD", skip_serializing_if = "Option::is_none")]
    claims: Option<ClaimsSet>,
    #[serde(rename = "JWT_TOKEN", skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl RequestState {
    pub fn claims(&self) -> Option<&ClaimsSet> {
        self.claims.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authorized(&self) -> bool {
        self.claims.is_some() && self.token.is_some()
    }

    pub(crate) fn set_claims(&mut self, claims: ClaimsSet) {
        self.claims = Some(claims);
    }

    pub(crate) fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }
}
