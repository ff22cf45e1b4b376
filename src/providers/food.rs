use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::providers::config::{FoodProduct, FoodSearchResponse};
use crate::providers::{http_client, FoodCandidate, FoodProvider, Lookup};

pub const DEFAULT_FOOD_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";
const PAGE_SIZE: &str = "10";

const KCAL_FIELD: &str = "energy-kcal_100g";
const KJ_FIELD: &str = "energy_100g";

/// Поиск продуктов в Open Food Facts.
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: DEFAULT_FOOD_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, query: &str) -> Result<Vec<FoodProduct>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("action", "process"),
                ("search_terms", query),
                ("json", "true"),
                ("page_size", PAGE_SIZE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("food service returned {}", status);
        }

        let text = response.text().await?;
        let body = serde_json::from_str::<FoodSearchResponse>(&text)?;
        Ok(body.products.unwrap_or_default())
    }
}

impl From<&FoodProduct> for FoodCandidate {
    fn from(product: &FoodProduct) -> Self {
        FoodCandidate {
            name: product.display_name(),
            kcal_per_100g: product.nutriment(KCAL_FIELD),
            kj_per_100g: product.nutriment(KJ_FIELD),
        }
    }
}

#[async_trait]
impl FoodProvider for OpenFoodFactsClient {
    async fn search(&self, query: &str) -> Lookup<Vec<FoodCandidate>> {
        match self.fetch(query).await {
            Ok(products) => {
                log::debug!("🔎 {} products for {:?}", products.len(), query);
                Lookup::Found(products.iter().map(FoodCandidate::from).collect())
            }
            Err(e) => {
                log::warn!("⚠️ Food search for {:?} failed: {}", query, e);
                Lookup::Unavailable
            }
        }
    }
}
