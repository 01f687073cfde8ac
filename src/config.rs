/*
 * Responsibility
 * - 環境変数からの設定読み込み (PORT, APP_ENV, JWT_* など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::services::auth::{GateConfig, KeySource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub gate: GateConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        // Path wins over inline PEM when both are set.
        let public_key = match (
            lookup("JWT_PUBLIC_KEY_PATH").filter(|v| !v.is_empty()),
            lookup("JWT_PUBLIC_KEY_PEM").filter(|v| !v.is_empty()),
        ) {
            (Some(path), _) => KeySource::Path(PathBuf::from(path)),
            (None, Some(pem)) => KeySource::Pem(pem.replace("\\n", "\n")),
            (None, None) => return Err(ConfigError::Missing("JWT_PUBLIC_KEY_PATH")),
        };

        let mut gate = GateConfig::new(public_key)
            .with_header_name(lookup("JWT_HEADER_NAME").unwrap_or_default())
            .with_header_prefix(lookup("JWT_HEADER_PREFIX").unwrap_or_default())
            .with_validate_exp(parse_bool(&lookup, "JWT_VALIDATE_EXP", true)?)
            .with_echo_token(parse_bool(&lookup, "JWT_ECHO_TOKEN", true)?);

        if let Some(v) = lookup("JWT_LEEWAY_SECONDS") {
            let leeway = v
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("JWT_LEEWAY_SECONDS"))?;
            gate = gate.with_leeway_seconds(leeway);
        }
        if let Some(issuer) = lookup("JWT_ISSUER").filter(|v| !v.trim().is_empty()) {
            gate = gate.with_issuer(issuer);
        }
        if let Some(audience) = lookup("JWT_AUDIENCE").filter(|v| !v.trim().is_empty()) {
            gate = gate.with_audience(audience);
        }

        Ok(Self {
            addr,
            app_env,
            gate,
        })
    }
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid(key)),
        },
    }
}
