//! Fixture keys and token minting shared by the unit tests.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

use super::config::{GateConfig, KeySource};

pub const SIGNING_PRIVATE_PEM: &str = include_str!("../../../tests/fixtures/signing_key.pem");
pub const SIGNING_PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/signing_key.pub");
pub const FOREIGN_PRIVATE_PEM: &str = include_str!("../../../tests/fixtures/foreign_key.pem");

pub fn gate_config() -> GateConfig {
    GateConfig::new(KeySource::Pem(SIGNING_PUBLIC_PEM.to_string()))
}

pub fn sign_with(alg: Algorithm, private_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(alg), claims, &key).unwrap()
}

pub fn sign(claims: &Value) -> String {
    sign_with(Algorithm::RS256, SIGNING_PRIVATE_PEM, claims)
}

pub fn sign_hmac(claims: &Value) -> String {
    let key = EncodingKey::from_secret(b"shared-secret");
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &key).unwrap()
}

/// Hand-assembled token; nothing about it is checked.
pub fn compact(header: &Value, claims: &Value, signature: &[u8]) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string()),
        URL_SAFE_NO_PAD.encode(signature)
    )
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
