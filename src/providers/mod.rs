//! Клиенты сервисов погоды и состава продуктов.
//!
//! При любой ошибке оба возвращают [`Lookup::Unavailable`], ошибки
//! транспорта наружу не выходят.

pub mod config;
pub mod food;
pub mod weather;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub use food::OpenFoodFactsClient;
pub use weather::OpenWeatherClient;

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Unavailable,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Unavailable => None,
        }
    }
}

/// Продукт из поиска, до оценки.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodCandidate {
    pub name: String,
    pub kcal_per_100g: Option<f64>,
    pub kj_per_100g: Option<f64>,
}

#[async_trait]
pub trait TemperatureProvider: Send + Sync {
    /// Текущая температура в городе, °C.
    async fn current_temperature(&self, city: &str) -> Lookup<f64>;
}

#[async_trait]
pub trait FoodProvider: Send + Sync {
    async fn search(&self, query: &str) -> Lookup<Vec<FoodCandidate>>;
}

/// HTTP-клиент с таймаутом; ошибка сборки прерывает запуск.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}
