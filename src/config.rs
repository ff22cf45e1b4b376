use std::env;
use std::time::Duration;
use thiserror::Error;

const BOT_TOKEN_ENV: &str = "BOT_TOKEN";
const WEATHER_API_KEY_ENV: &str = "OWM_API_KEY";
const WEATHER_API_URL_ENV: &str = "OWM_API_URL";
const FOOD_API_URL_ENV: &str = "FOOD_API_URL";
const HTTP_TIMEOUT_ENV: &str = "HTTP_TIMEOUT_SECS";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bot_token: String,
    /// Без ключа температура всегда неизвестна.
    pub weather_api_key: Option<String>,
    pub weather_api_url: Option<String>,
    pub food_api_url: Option<String>,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Собирает конфиг из любого источника имя → значение. Пустые значения
    /// считаются незаданными.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = get(BOT_TOKEN_ENV).ok_or(ConfigError::Missing(BOT_TOKEN_ENV))?;

        let http_timeout = match get(HTTP_TIMEOUT_ENV) {
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: HTTP_TIMEOUT_ENV,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            bot_token,
            weather_api_key: get(WEATHER_API_KEY_ENV),
            weather_api_url: get(WEATHER_API_URL_ENV),
            food_api_url: get(FOOD_API_URL_ENV),
            http_timeout,
        })
    }
}
