//! Подбор калорийности продукта по свободному запросу.

use crate::providers::{FoodCandidate, FoodProvider, Lookup};

const KJ_PER_KCAL: f64 = 4.184;
const WHOLE_QUERY_SCORE: u32 = 3;
const TOKEN_SCORE: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct FoodMatch {
    pub name: String,
    pub kcal_per_100g: f64,
}

/// Ищет продукт у провайдера и оценивает результаты по `query`.
pub async fn match_food(provider: &dyn FoodProvider, query: &str) -> Option<FoodMatch> {
    match provider.search(query).await {
        Lookup::Found(candidates) => best_candidate(query, &candidates),
        Lookup::Unavailable => None,
    }
}

/// Кандидат с наибольшим счётом и пригодной калорийностью. При равенстве
/// остаётся более ранний.
pub fn best_candidate(query: &str, candidates: &[FoodCandidate]) -> Option<FoodMatch> {
    let normalized_query = normalize(query);
    let mut best: Option<(u32, FoodMatch)> = None;

    for candidate in candidates {
        let Some(kcal_per_100g) = energy_kcal(candidate) else {
            continue;
        };
        let score = score(&normalized_query, &normalize(&candidate.name));
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((
                score,
                FoodMatch {
                    name: candidate.name.clone(),
                    kcal_per_100g,
                },
            ));
        }
    }

    best.map(|(_, m)| m)
}

fn energy_kcal(candidate: &FoodCandidate) -> Option<f64> {
    usable(candidate.kcal_per_100g)
        .or_else(|| usable(candidate.kj_per_100g).map(|kj| kj / KJ_PER_KCAL))
}

/// Годится только конечное неотрицательное значение.
fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

/// Нижний регистр, только буквы, цифры и пробелы.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .trim()
        .to_string()
}

fn score(query: &str, name: &str) -> u32 {
    let mut score = 0;
    if !query.is_empty() && name.contains(query) {
        score += WHOLE_QUERY_SCORE;
    }
    for token in query.split_whitespace() {
        if name.contains(token) {
            score += TOKEN_SCORE;
        }
    }
    score
}
