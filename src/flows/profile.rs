use crate::flows::{decimal_in_range, integer_in_range, Validated};
use crate::models::profile::{
    UserProfile, ACTIVITY_MINUTES_MAX, AGE_YEARS_MAX, CALORIE_GOAL_MAX, CALORIE_GOAL_MIN,
    HEIGHT_CM_MAX, WEIGHT_KG_MAX,
};

/// Ответы «без ручной цели по калориям».
const NO_OVERRIDE_ANSWERS: [&str; 3] = ["нет", "no", "n"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStep {
    Weight,
    Height,
    Age,
    Activity,
    City,
    CalorieGoal,
}

impl ProfileStep {
    pub fn prompt(self) -> &'static str {
        match self {
            ProfileStep::Weight => "Введите вес (кг):",
            ProfileStep::Height => "Введите рост (см):",
            ProfileStep::Age => "Введите возраст:",
            ProfileStep::Activity => "Минут активности в день:",
            ProfileStep::City => "Город (для погоды):",
            ProfileStep::CalorieGoal => "Цель калорий вручную? Число или 'нет':",
        }
    }
}

/// Собранные значения; поле заполняется после проверки своего шага.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age_years: Option<u32>,
    pub activity_minutes: Option<u32>,
    pub city: Option<String>,
}

impl ProfileDraft {
    fn complete(self, calorie_goal_override: Option<u32>) -> Option<UserProfile> {
        Some(UserProfile {
            weight_kg: self.weight_kg?,
            height_cm: self.height_cm?,
            age_years: self.age_years?,
            activity_minutes: self.activity_minutes?,
            city: self.city?,
            calorie_goal_override,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFlow {
    pub step: ProfileStep,
    pub draft: ProfileDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileTransition {
    /// Ввод принят, следующий вопрос.
    Advance(ProfileFlow, &'static str),
    /// Ввод отклонён, шаг тот же.
    Retry(ProfileFlow, &'static str),
    Completed(UserProfile),
}

impl Default for ProfileFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFlow {
    pub fn new() -> Self {
        Self {
            step: ProfileStep::Weight,
            draft: ProfileDraft::default(),
        }
    }

    pub fn advance(self, text: &str) -> ProfileTransition {
        match self.step {
            ProfileStep::Weight => self.accept(
                decimal_in_range(text, 0.0, false, WEIGHT_KG_MAX, "Введите корректный вес (например 80)."),
                |d, v| d.weight_kg = Some(v),
                ProfileStep::Height,
            ),
            ProfileStep::Height => self.accept(
                decimal_in_range(text, 0.0, false, HEIGHT_CM_MAX, "Введите корректный рост (например 184)."),
                |d, v| d.height_cm = Some(v),
                ProfileStep::Age,
            ),
            ProfileStep::Age => self.accept(
                integer_in_range(text, 1, AGE_YEARS_MAX as i64, "Введите корректный возраст (например 26)."),
                |d, v| d.age_years = Some(v),
                ProfileStep::Activity,
            ),
            ProfileStep::Activity => self.accept(
                integer_in_range(
                    text,
                    0,
                    ACTIVITY_MINUTES_MAX as i64,
                    "Введите корректное число минут (например 45).",
                ),
                |d, v| d.activity_minutes = Some(v),
                ProfileStep::City,
            ),
            ProfileStep::City => self.accept(validate_city(text), |d, v| d.city = Some(v), ProfileStep::CalorieGoal),
            ProfileStep::CalorieGoal => match validate_override(text) {
                Validated::Valid(goal) => match self.draft.complete(goal) {
                    Some(profile) => ProfileTransition::Completed(profile),
                    // Сюда попадаем только с вручную собранным сценарием, начинаем заново.
                    None => ProfileTransition::Advance(ProfileFlow::new(), ProfileStep::Weight.prompt()),
                },
                Validated::Invalid(reason) => ProfileTransition::Retry(self, reason),
            },
        }
    }

    fn accept<T>(
        mut self,
        value: Validated<T>,
        store: impl FnOnce(&mut ProfileDraft, T),
        next: ProfileStep,
    ) -> ProfileTransition {
        match value {
            Validated::Valid(v) => {
                store(&mut self.draft, v);
                self.step = next;
                ProfileTransition::Advance(self, next.prompt())
            }
            Validated::Invalid(reason) => ProfileTransition::Retry(self, reason),
        }
    }
}

fn validate_city(text: &str) -> Validated<String> {
    let city = text.trim();
    if city.is_empty() {
        Validated::Invalid("Введите город текстом.")
    } else {
        Validated::Valid(city.to_string())
    }
}

fn validate_override(text: &str) -> Validated<Option<u32>> {
    let answer = text.trim().to_lowercase();
    if NO_OVERRIDE_ANSWERS.contains(&answer.as_str()) {
        return Validated::Valid(None);
    }
    match integer_in_range(
        &answer,
        CALORIE_GOAL_MIN as i64,
        CALORIE_GOAL_MAX as i64,
        "Либо число (например 2500), либо 'нет'.",
    ) {
        Validated::Valid(goal) => Validated::Valid(Some(goal)),
        Validated::Invalid(reason) => Validated::Invalid(reason),
    }
}
