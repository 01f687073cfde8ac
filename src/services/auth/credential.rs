use axum::http::{HeaderMap, HeaderName};

use super::error::AuthError;

/// Pulls the raw credential out of `<header_name>: <header_prefix> <token>`.
#[derive(Debug, Clone)]
pub struct CredentialExtractor {
    header_name: HeaderName,
    header_prefix: String,
}

impl CredentialExtractor {
    pub fn new(header_name: HeaderName, header_prefix: impl Into<String>) -> Self {
        Self {
            header_name,
            header_prefix: header_prefix.into(),
        }
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    pub fn header_prefix(&self) -> &str {
        &self.header_prefix
    }

    /// Only the first value of the header is considered. The scheme match is
    /// case-sensitive and the token after the first space is returned as-is.
    pub fn extract<'a>(&self, headers: &'a HeaderMap) -> Result<&'a str, AuthError> {
        let value = match headers.get(&self.header_name) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(AuthError::EmptyAuthHeader),
        };
        let value = value.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;

        match value.split_once(' ') {
            Some((scheme, token)) if scheme == self.header_prefix => Ok(token),
            _ => Err(AuthError::InvalidAuthHeader),
        }
    }
}
