use crate::flows::{decimal_in_range, Validated};
use crate::models::FoodEntry;

const KCAL_PER_100G_MAX: f64 = 2000.0;
const GRAMS_MAX: f64 = 5000.0;

pub const NOT_FOUND_PROMPT: &str = "Не нашёл продукт. Введите ккал на 100 г вручную:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodStep {
    ManualKcal,
    Grams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodFlow {
    pub step: FoodStep,
    pub name: String,
    pub kcal_per_100g: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FoodTransition {
    Advance(FoodFlow, String),
    Retry(FoodFlow, &'static str),
    Completed(FoodEntry),
}

impl FoodFlow {
    /// Старт с шага граммов, калорийность найдена.
    pub fn matched(name: impl Into<String>, kcal_per_100g: f64) -> Self {
        Self {
            step: FoodStep::Grams,
            name: name.into(),
            kcal_per_100g: Some(kcal_per_100g),
        }
    }

    /// Старт с ручного ввода калорийности, имя берётся из запроса.
    pub fn manual(query: impl Into<String>) -> Self {
        Self {
            step: FoodStep::ManualKcal,
            name: query.into(),
            kcal_per_100g: None,
        }
    }

    /// Вопрос для текущего шага.
    pub fn prompt(&self) -> String {
        match (self.step, self.kcal_per_100g) {
            (FoodStep::Grams, Some(kcal)) => grams_prompt(&self.name, kcal),
            _ => NOT_FOUND_PROMPT.to_string(),
        }
    }

    pub fn advance(mut self, text: &str) -> FoodTransition {
        match self.step {
            FoodStep::ManualKcal => {
                match decimal_in_range(text, 0.0, true, KCAL_PER_100G_MAX, "Введите корректное число (например 89).") {
                    Validated::Valid(kcal) => {
                        self.kcal_per_100g = Some(kcal);
                        self.step = FoodStep::Grams;
                        let prompt = grams_prompt(&self.name, kcal);
                        FoodTransition::Advance(self, prompt)
                    }
                    Validated::Invalid(reason) => FoodTransition::Retry(self, reason),
                }
            }
            FoodStep::Grams => {
                let Some(kcal_per_100g) = self.kcal_per_100g else {
                    self.step = FoodStep::ManualKcal;
                    return FoodTransition::Advance(self, NOT_FOUND_PROMPT.to_string());
                };
                match decimal_in_range(text, 0.0, false, GRAMS_MAX, "Введите граммы числом (например 150).") {
                    Validated::Valid(grams) => FoodTransition::Completed(FoodEntry {
                        name: self.name,
                        grams,
                        kcal: kcal_per_100g * grams / 100.0,
                    }),
                    Validated::Invalid(reason) => FoodTransition::Retry(self, reason),
                }
            }
        }
    }
}

fn grams_prompt(name: &str, kcal_per_100g: f64) -> String {
    format!("{name} {kcal_per_100g:.0} ккал/100г. Сколько грамм?")
}
