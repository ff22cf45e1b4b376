use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Имя для продуктов без названия.
pub const UNNAMED_PRODUCT: &str = "Продукт";

/// Ответ `GET /data/2.5/weather`, только нужные поля.
#[derive(Clone, Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: CurrentWeatherMain,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CurrentWeatherMain {
    pub temp: f64,
}

/// Ответ Open Food Facts `search.pl`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FoodSearchResponse {
    #[serde(default)]
    pub products: Option<Vec<FoodProduct>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FoodProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub generic_name: Option<String>,
    /// Значение бывает числом или строкой, зависит от продукта.
    #[serde(default)]
    pub nutriments: Option<HashMap<String, Value>>,
}

impl FoodProduct {
    pub fn display_name(&self) -> String {
        [&self.product_name, &self.generic_name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(UNNAMED_PRODUCT)
            .to_string()
    }

    pub fn nutriment(&self, key: &str) -> Option<f64> {
        match self.nutriments.as_ref()?.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}
