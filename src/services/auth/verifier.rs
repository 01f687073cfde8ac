//! RSA access-token verification.
//!
//! The verifier does its own structural parse and algorithm check before the
//! token reaches `jsonwebtoken`, so that `alg: none`, HMAC and any other family
//! are turned away with `UnsupportedAlgorithm` instead of surfacing as a parse
//! error. Signature and time-claim checks are left to `jsonwebtoken::decode`,
//! pinned to the single algorithm the header declared.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::{Map, Value};

use super::config::GateConfig;
use super::error::AuthError;
use super::request_state::RequestState;

/// RSASSA-PKCS1-v1_5 variants. PSS and every non-RSA family are refused.
pub const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

pub type Payload = Map<String, Value>;

/// A token whose signature has been checked against the loaded key.
///
/// Only `TokenVerifier` can build one.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    algorithm: Algorithm,
    payload: Payload,
}

impl VerifiedToken {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(key: DecodingKey, config: &GateConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // exp/nbf are optional; when present they are still checked.
        validation.required_spec_claims.clear();
        validation.validate_exp = config.validate_exp;
        validation.validate_nbf = config.validate_exp;
        validation.leeway = config.leeway_seconds;

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self { key, validation }
    }

    /// Verify `raw` and record it in `state` for the response echo.
    pub fn verify(
        &self,
        raw: &str,
        state: &mut RequestState,
    ) -> Result<VerifiedToken, AuthError> {
        let token = self.decode(raw)?;
        state.set_token(raw);
        Ok(token)
    }

    /// Verify `raw` without touching any request state.
    pub fn decode(&self, raw: &str) -> Result<VerifiedToken, AuthError> {
        let header = parse_structure(raw)?;
        let algorithm = pinned_algorithm(&header)?;

        let mut validation = self.validation.clone();
        validation.algorithms = vec![algorithm];

        let data = jsonwebtoken::decode::<Payload>(raw, &self.key, &validation)
            .map_err(|err| classify(&err))?;

        Ok(VerifiedToken {
            algorithm,
            payload: data.claims,
        })
    }
}

/// Three base64url segments; header and payload must be JSON objects.
/// Returns the decoded header.
fn parse_structure(raw: &str) -> Result<Payload, AuthError> {
    let mut segments = raw.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken);
    };

    let header = decode_object(header)?;
    decode_object(payload)?;
    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| AuthError::MalformedToken)?;

    Ok(header)
}

fn decode_object(segment: &str) -> Result<Payload, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthError::MalformedToken)?;
    serde_json::from_slice::<Payload>(&bytes).map_err(|_| AuthError::MalformedToken)
}

// Anything we cannot positively identify as an accepted RSA algorithm is refused.
fn pinned_algorithm(header: &Payload) -> Result<Algorithm, AuthError> {
    let name = header
        .get("alg")
        .and_then(Value::as_str)
        .ok_or(AuthError::UnsupportedAlgorithm)?;

    name.parse::<Algorithm>()
        .ok()
        .filter(|alg| ACCEPTED_ALGORITHMS.contains(alg))
        .ok_or(AuthError::UnsupportedAlgorithm)
}

fn classify(err: &jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        ErrorKind::ImmatureSignature => AuthError::ImmatureToken,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::MissingRequiredClaim(_) => AuthError::ClaimMismatch,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            AuthError::UnsupportedAlgorithm
        }
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::MalformedToken,
        _ => AuthError::InvalidSignature,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::auth::key::load_public_key;
    use crate::services::auth::test_support::{
        FOREIGN_PRIVATE_PEM, SIGNING_PRIVATE_PEM, compact, gate_config, now, sign, sign_hmac,
        sign_with,
    };

    fn verifier_with(config: GateConfig) -> TokenVerifier {
        let key = load_public_key(&config.public_key).unwrap();
        TokenVerifier::new(key, &config)
    }

    fn verifier() -> TokenVerifier {
        verifier_with(gate_config())
    }

    #[test]
    fn accepts_token_signed_with_configured_key() {
        let claims = json!({"sub": "u1", "role": "admin"});
        let token = sign(&claims);

        let verified = verifier().decode(&token).unwrap();
        assert_eq!(verified.algorithm(), Algorithm::RS256);
        assert_eq!(Value::Object(verified.payload().clone()), claims);
    }

    #[test]
    fn accepts_every_rsa_pkcs1_variant() {
        for alg in ACCEPTED_ALGORITHMS {
            let token = sign_with(alg, SIGNING_PRIVATE_PEM, &json!({"sub": "u1"}));
            assert_eq!(verifier().decode(&token).unwrap().algorithm(), alg);
        }
    }

    #[test]
    fn verify_records_raw_token() {
        let token = sign(&json!({"sub": "u1"}));
        let mut state = RequestState::default();

        verifier().verify(&token, &mut state).unwrap();
        assert_eq!(state.token(), Some(token.as_str()));
    }

    #[test]
    fn failed_verification_leaves_state_untouched() {
        let token = sign_with(Algorithm::RS256, FOREIGN_PRIVATE_PEM, &json!({"sub": "u1"}));
        let mut state = RequestState::default();

        assert_eq!(
            verifier().verify(&token, &mut state),
            Err(AuthError::InvalidSignature)
        );
        assert_eq!(state, RequestState::default());
    }

    #[test]
    fn foreign_key_is_invalid_signature() {
        let token = sign_with(Algorithm::RS256, FOREIGN_PRIVATE_PEM, &json!({"sub": "u1"}));
        assert_eq!(verifier().decode(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn tampered_payload_is_invalid_signature() {
        let token = sign(&json!({"sub": "u1", "role": "user"}));
        let forged = sign(&json!({"sub": "u1", "role": "admin"}));

        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged.split('.').nth(1).unwrap();
        let tampered = parts.join(".");

        assert_eq!(
            verifier().decode(&tampered),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn alg_none_is_unsupported() {
        let token = compact(&json!({"alg": "none", "typ": "JWT"}), &json!({"sub": "u1"}), b"");
        assert_eq!(verifier().decode(&token), Err(AuthError::UnsupportedAlgorithm));
    }

    #[test]
    fn hmac_is_unsupported() {
        let token = sign_hmac(&json!({"sub": "u1"}));
        assert_eq!(verifier().decode(&token), Err(AuthError::UnsupportedAlgorithm));
    }

    #[test]
    fn rsa_pss_is_unsupported() {
        let token = sign_with(Algorithm::PS256, SIGNING_PRIVATE_PEM, &json!({"sub": "u1"}));
        assert_eq!(verifier().decode(&token), Err(AuthError::UnsupportedAlgorithm));
    }

    #[test]
    fn missing_or_odd_alg_is_unsupported() {
        for header in [
            json!({"typ": "JWT"}),
            json!({"alg": 256}),
            json!({"alg": null}),
            json!({"alg": "rs256"}),
        ] {
            let token = compact(&header, &json!({"sub": "u1"}), b"sig");
            assert_eq!(
                verifier().decode(&token),
                Err(AuthError::UnsupportedAlgorithm),
                "header: {header}"
            );
        }
    }

    #[test]
    fn structural_damage_is_malformed() {
        let valid = sign(&json!({"sub": "u1"}));
        let segments: Vec<&str> = valid.split('.').collect();

        let cases = [
            String::new(),
            "abc".to_string(),
            "abc.def".to_string(),
            format!("{valid}.extra"),
            format!("!!!.{}.{}", segments[1], segments[2]),
            format!("{}.{}.***", segments[0], segments[1]),
            format!("{}.{}.{}", URL_SAFE_NO_PAD.encode("not json"), segments[1], segments[2]),
            format!("{}.{}.{}", segments[0], URL_SAFE_NO_PAD.encode("[1,2]"), segments[2]),
        ];

        for case in cases {
            assert_eq!(
                verifier().decode(&case),
                Err(AuthError::MalformedToken),
                "token: {case}"
            );
        }
    }

    #[test]
    fn structure_is_checked_before_algorithm() {
        let token = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(json!({"alg": "none"}).to_string()),
            URL_SAFE_NO_PAD.encode("{}")
        );
        assert_eq!(verifier().decode(&token), Err(AuthError::MalformedToken));
    }

    #[test]
    fn time_claims_are_optional() {
        let token = sign(&json!({"sub": "u1"}));
        assert!(verifier().decode(&token).is_ok());
    }

    #[test]
    fn future_expiry_is_accepted() {
        let token = sign(&json!({"sub": "u1", "exp": now() + 3600}));
        assert!(verifier().decode(&token).is_ok());
    }

    #[test]
    fn past_expiry_is_rejected() {
        let token = sign(&json!({"sub": "u1", "exp": now() - 3600}));
        assert_eq!(verifier().decode(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn future_not_before_is_rejected() {
        let token = sign(&json!({"sub": "u1", "nbf": now() + 3600}));
        assert_eq!(verifier().decode(&token), Err(AuthError::ImmatureToken));
    }

    #[test]
    fn leeway_covers_small_clock_skew() {
        let token = sign(&json!({"sub": "u1", "exp": now() - 30}));
        let verifier = verifier_with(gate_config().with_leeway_seconds(120));
        assert!(verifier.decode(&token).is_ok());
    }

    #[test]
    fn time_checks_can_be_disabled() {
        let token = sign(&json!({"sub": "u1", "exp": now() - 3600}));
        let verifier = verifier_with(gate_config().with_validate_exp(false));
        assert!(verifier.decode(&token).is_ok());
    }

    #[test]
    fn audience_claim_is_ignored_unless_configured() {
        let token = sign(&json!({"sub": "u1", "aud": "billing"}));
        assert!(verifier().decode(&token).is_ok());
    }

    #[test]
    fn issuer_and_audience_are_enforced_when_configured() {
        let verifier = verifier_with(
            gate_config()
                .with_issuer("https://auth.example")
                .with_audience("api"),
        );

        let good = sign(&json!({"sub": "u1", "iss": "https://auth.example", "aud": "api"}));
        assert!(verifier.decode(&good).is_ok());

        let wrong_iss = sign(&json!({"sub": "u1", "iss": "https://evil.example", "aud": "api"}));
        assert_eq!(verifier.decode(&wrong_iss), Err(AuthError::ClaimMismatch));

        let wrong_aud = sign(&json!({"sub": "u1", "iss": "https://auth.example", "aud": "web"}));
        assert_eq!(verifier.decode(&wrong_aud), Err(AuthError::ClaimMismatch));
    }

    #[test]
    fn debug_output_omits_key_material() {
        let rendered = format!("{:?}", verifier());
        assert!(rendered.starts_with("TokenVerifier"));
        assert!(rendered.contains("validation"));
        assert!(!rendered.contains("DecodingKey"));
    }
}
