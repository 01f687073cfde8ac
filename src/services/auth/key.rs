//! Public key bootstrap.
//!
//! Runs once at startup, outside the request path. The result is handed to the
//! verifier and never touched again.

use jsonwebtoken::DecodingKey;

use super::config::KeySource;
use super::error::BootstrapError;

/// Read and parse an RSA public key (SPKI `PUBLIC KEY` or PKCS#1 `RSA PUBLIC KEY`).
pub fn load_public_key(source: &KeySource) -> Result<DecodingKey, BootstrapError> {
    let pem = match source {
        KeySource::Path(path) => {
            if path.as_os_str().is_empty() {
                return Err(BootstrapError::MissingKeySource);
            }
            std::fs::read(path).map_err(|source| BootstrapError::ReadKey {
                path: path.clone(),
                source,
            })?
        }
        KeySource::Pem(pem) => {
            if pem.trim().is_empty() {
                return Err(BootstrapError::MissingKeySource);
            }
            pem.as_bytes().to_vec()
        }
    };

    // from_rsa_pem also takes private keys; only a public key may reach the verifier.
    match pem_label(&pem) {
        Some("PUBLIC KEY" | "RSA PUBLIC KEY") | None => {}
        Some(label) => return Err(BootstrapError::NotPublicKey(label.to_string())),
    }

    DecodingKey::from_rsa_pem(&pem).map_err(BootstrapError::InvalidKey)
}

/// Label of the first `-----BEGIN <label>-----` line, if any.
fn pem_label(pem: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(pem).ok()?;
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("-----BEGIN "))
        .and_then(|rest| rest.strip_suffix("-----"))
}
