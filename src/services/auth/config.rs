use std::path::PathBuf;

pub const DEFAULT_HEADER_NAME: &str = "Authorization";
pub const DEFAULT_HEADER_PREFIX: &str = "Bearer";

/// Where the RSA public key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// PEM file on disk, read once at startup.
    Path(PathBuf),
    /// PEM text, e.g. passed through an environment variable.
    Pem(String),
}

/// Gate settings, fixed at startup.
///
/// - Empty `header_name` / `header_prefix` fall back to `Authorization` / `Bearer`
///   when the gate is built.
/// - `validate_exp` covers both `exp` and `nbf`; tokens without those claims are
///   accepted either way.
/// - `issuer` / `audience` are only enforced when set.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub public_key: KeySource,
    pub header_name: String,
    pub header_prefix: String,
    pub validate_exp: bool,
    pub leeway_seconds: u64,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub echo_token: bool,
}

impl GateConfig {
    pub fn new(public_key: KeySource) -> Self {
        Self {
            public_key,
            header_name: DEFAULT_HEADER_NAME.to_string(),
            header_prefix: DEFAULT_HEADER_PREFIX.to_string(),
            validate_exp: true,
            leeway_seconds: 0,
            issuer: None,
            audience: None,
            echo_token: true,
        }
    }

    pub fn with_header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    pub fn with_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    pub fn with_validate_exp(mut self, validate_exp: bool) -> Self {
        self.validate_exp = validate_exp;
        self
    }

    pub fn with_leeway_seconds(mut self, leeway_seconds: u64) -> Self {
        self.leeway_seconds = leeway_seconds;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_echo_token(mut self, echo_token: bool) -> Self {
        self.echo_token = echo_token;
        self
    }

    pub(crate) fn resolved_header_name(&self) -> &str {
        non_empty_or(&self.header_name, DEFAULT_HEADER_NAME)
    }

    pub(crate) fn resolved_header_prefix(&self) -> &str {
        non_empty_or(&self.header_prefix, DEFAULT_HEADER_PREFIX)
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}
