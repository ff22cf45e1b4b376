//! Многошаговые диалоги.
//!
//! Сценарий хранит текущий шаг и уже собранные значения. Одно сообщение даёт
//! чистый переход: повтор того же шага, следующий шаг или готовое значение,
//! которое сохраняет движок.

pub mod food;
pub mod profile;

pub use food::{FoodFlow, FoodStep, FoodTransition};
pub use profile::{ProfileFlow, ProfileStep, ProfileTransition};

/// Результат проверки одного поля.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(&'static str),
}

/// Текущий диалог пользователя.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Profile(ProfileFlow),
    Food(FoodFlow),
}

impl Session {
    pub fn name(&self) -> &'static str {
        match self {
            Session::Profile(_) => "profile",
            Session::Food(_) => "food",
        }
    }
}

/// Разбор дробного числа, запятая тоже разделитель.
pub(crate) fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub(crate) fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// Проверка дробного числа в `(min, max]`, или `[min, max]` при `min_inclusive`.
pub(crate) fn decimal_in_range(
    text: &str,
    min: f64,
    min_inclusive: bool,
    max: f64,
    reason: &'static str,
) -> Validated<f64> {
    match parse_decimal(text) {
        Some(v) if (v > min || (min_inclusive && v == min)) && v <= max => Validated::Valid(v),
        _ => Validated::Invalid(reason),
    }
}

/// Проверка целого в `[min, max]`.
pub(crate) fn integer_in_range(text: &str, min: i64, max: i64, reason: &'static str) -> Validated<u32> {
    match parse_integer(text) {
        Some(v) if (min..=max).contains(&v) => Validated::Valid(v as u32),
        _ => Validated::Invalid(reason),
    }
}
