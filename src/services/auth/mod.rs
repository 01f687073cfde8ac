//! Bearer JWT gate: credential extraction, RSA verification, claims projection.

pub mod claims;
pub mod config;
pub mod credential;
pub mod error;
pub mod gate;
pub mod key;
pub mod request_state;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::{ClaimsSet, claims_from_token, extract_claims, extract_verified_token_string};
pub use config::{GateConfig, KeySource};
pub use error::{AuthError, BootstrapError};
pub use gate::{GateOutcome, GateStage, JwtGate};
pub use request_state::RequestState;
pub use verifier::VerifiedToken;
