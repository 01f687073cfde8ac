use std::collections::BTreeMap;

use serde_json::Value;

use super::request_state::RequestState;
use super::verifier::VerifiedToken;

/// Claim name -> arbitrary JSON value. Callers needing typed claims deserialize
/// on top of this map.
pub type ClaimsSet = BTreeMap<String, Value>;

/// Flatten the verified payload into `state` and return the projected claims.
pub fn project(token: &VerifiedToken, state: &mut RequestState) -> ClaimsSet {
    let claims = claims_from_token(token);
    state.set_claims(claims.clone());
    claims
}

/// Claims of a token held outside the request flow.
pub fn claims_from_token(token: &VerifiedToken) -> ClaimsSet {
    token
        .payload()
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Claims stored for this request, or an empty map when the gate never ran.
pub fn extract_claims(state: &RequestState) -> ClaimsSet {
    state.claims().cloned().unwrap_or_default()
}

/// Verified raw token for this request, or `""` when the gate never ran.
pub fn extract_verified_token_string(state: &RequestState) -> &str {
    state.token().unwrap_or_default()
}
