use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} 환경 변수가 설정되어야 합니다")]
    Missing(&'static str),
    #[error("DISCORD_WEBHOOK_URL 값이 올바른 URL이 아닙니다: {0}")]
    InvalidWebhookUrl(String),
    #[error("{key} 값이 올바르지 않습니다: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// 프로세스 시작 시 한 번 읽어 검증하는 설정값.
#[derive(Clone)]
pub struct Settings {
    pub auth_token: String,
    pub discord_webhook_url: Url,
    pub host: String,
    pub port: u16,
    pub delivery_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| non_empty(key).ok_or(ConfigError::Missing(key));

        let auth_token = required("AUTH_TOKEN")?;
        let discord_webhook_url = parse_webhook_url(&required("DISCORD_WEBHOOK_URL")?)?;

        let host = non_empty("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match non_empty("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "APP_PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match non_empty("DELIVERY_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "DELIVERY_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_DELIVERY_TIMEOUT_SECS,
        };

        Ok(Self {
            auth_token,
            discord_webhook_url,
            host,
            port,
            delivery_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_webhook_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidWebhookUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        scheme => Err(ConfigError::InvalidWebhookUrl(format!(
            "지원하지 않는 URL입니다 (scheme: {})",
            scheme
        ))),
    }
}

// 웹훅 URL과 토큰은 비밀값이라 로그에 남기지 않는다
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("auth_token", &"***")
            .field("discord_webhook_url", &self.discord_webhook_url.host_str())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("delivery_timeout", &self.delivery_timeout)
            .finish()
    }
}
