pub const WEIGHT_KG_MAX: f64 = 400.0;
pub const HEIGHT_CM_MAX: f64 = 260.0;
pub const AGE_YEARS_MAX: u32 = 120;
pub const ACTIVITY_MINUTES_MAX: u32 = 600;
pub const CALORIE_GOAL_MIN: u32 = 800;
pub const CALORIE_GOAL_MAX: u32 = 6000;

/// Параметры тела и настройки из анкеты профиля.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    /// Обычная активность в минутах в день, без записанных тренировок.
    pub activity_minutes: u32,
    /// Город для запроса температуры.
    pub city: String,
    pub calorie_goal_override: Option<u32>,
}
