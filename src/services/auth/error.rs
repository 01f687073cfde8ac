use std::path::PathBuf;

use thiserror::Error;

/// Per-request verification failures.
///
/// Every variant maps to the same `401 Not Authorized` response; the kind is
/// only ever written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("auth header is empty")]
    EmptyAuthHeader,
    #[error("auth header is invalid")]
    InvalidAuthHeader,
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signing algorithm is not supported")]
    UnsupportedAlgorithm,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is expired")]
    ExpiredToken,
    #[error("token is not valid yet")]
    ImmatureToken,
    #[error("token claims do not match the configured issuer/audience")]
    ClaimMismatch,
}

/// Startup failures. The server must not start serving when one of these occurs.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("public key source is empty")]
    MissingKeySource,
    #[error("failed to read public key from {}", path.display())]
    ReadKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("public key is not a valid RSA PEM key")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
    #[error("expected a PUBLIC KEY or RSA PUBLIC KEY PEM, found {0:?}")]
    NotPublicKey(String),
    #[error("invalid auth header name: {0:?}")]
    InvalidHeaderName(String),
    #[error("invalid auth header prefix: {0:?}")]
    InvalidHeaderPrefix(String),
}
