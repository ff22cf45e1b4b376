use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::providers::config::CurrentWeatherResponse;
use crate::providers::{http_client, Lookup, TemperatureProvider};

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Клиент текущей погоды OpenWeatherMap.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Без ключа API любой запрос даёт [`Lookup::Unavailable`].
    pub fn new(api_key: Option<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: DEFAULT_WEATHER_URL.to_string(),
            api_key,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, city: &str, api_key: &str) -> Result<f64> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric"), ("lang", "ru")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("weather service returned {}", status);
        }

        let text = response.text().await?;
        let body = serde_json::from_str::<CurrentWeatherResponse>(&text)?;
        Ok(body.main.temp)
    }
}

#[async_trait]
impl TemperatureProvider for OpenWeatherClient {
    async fn current_temperature(&self, city: &str) -> Lookup<f64> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Lookup::Unavailable;
        };

        match self.fetch(city, api_key).await {
            Ok(temp) => {
                log::debug!("🌡️ {} is {:.1} C", city, temp);
                Lookup::Found(temp)
            }
            Err(e) => {
                log::warn!("⚠️ Temperature lookup for {} failed: {}", city, e);
                Lookup::Unavailable
            }
        }
    }
}
