//! Extract -> verify -> project, once per request.
//!
//! `Unchecked -> Extracting -> Verifying -> {Authorized, Rejected}`. There is
//! no partial outcome: either the returned `RequestState` carries both slots,
//! or the request is rejected and no state escapes.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use super::claims;
use super::config::GateConfig;
use super::credential::CredentialExtractor;
use super::error::{AuthError, BootstrapError};
use super::key::load_public_key;
use super::request_state::RequestState;
use super::verifier::{TokenVerifier, VerifiedToken};

/// Where the gate stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStage {
    Extracting,
    Verifying,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Authorized(RequestState),
    Rejected { stage: GateStage, reason: AuthError },
}

#[derive(Debug, Clone)]
pub struct JwtGate {
    extractor: CredentialExtractor,
    verifier: TokenVerifier,
    echo_token: bool,
}

impl JwtGate {
    /// Load the key and resolve header settings. Any error here is fatal.
    pub fn new(config: GateConfig) -> Result<Self, BootstrapError> {
        let header_name = config.resolved_header_name();
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .map_err(|_| BootstrapError::InvalidHeaderName(header_name.to_string()))?;

        let header_prefix = config.resolved_header_prefix();
        if header_prefix.contains(' ') || HeaderValue::from_str(header_prefix).is_err() {
            return Err(BootstrapError::InvalidHeaderPrefix(header_prefix.to_string()));
        }

        let key = load_public_key(&config.public_key)?;

        tracing::info!(
            header = %header_name,
            prefix = header_prefix,
            validate_exp = config.validate_exp,
            "jwt gate ready"
        );

        Ok(Self {
            extractor: CredentialExtractor::new(header_name, header_prefix),
            verifier: TokenVerifier::new(key, &config),
            echo_token: config.echo_token,
        })
    }

    pub fn evaluate(&self, headers: &HeaderMap) -> GateOutcome {
        let raw = match self.extractor.extract(headers) {
            Ok(raw) => raw,
            Err(reason) => {
                return GateOutcome::Rejected {
                    stage: GateStage::Extracting,
                    reason,
                };
            }
        };

        let mut state = RequestState::default();
        let token = match self.verifier.verify(raw, &mut state) {
            Ok(token) => token,
            Err(reason) => {
                return GateOutcome::Rejected {
                    stage: GateStage::Verifying,
                    reason,
                };
            }
        };
        claims::project(&token, &mut state);

        GateOutcome::Authorized(state)
    }

    /// Verify a token obtained outside of a request (no header, no state).
    pub fn verify_token(&self, raw: &str) -> Result<VerifiedToken, AuthError> {
        self.verifier.decode(raw)
    }

    /// `<header_name>: <prefix> <token>` to re-set on the response, if enabled.
    pub fn echo_header(&self, state: &RequestState) -> Option<(HeaderName, HeaderValue)> {
        if !self.echo_token {
            return None;
        }
        let token = state.token()?;
        let value = format!("{} {}", self.extractor.header_prefix(), token);
        let value = match HeaderValue::from_str(&value) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "echo header not set");
                return None;
            }
        };
        Some((self.extractor.header_name().clone(), value))
    }
}
