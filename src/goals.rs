use crate::models::UserProfile;

/// Мл воды на килограмм веса.
const WATER_ML_PER_KG: f64 = 30.0;
/// Доп. вода за каждые 30 минут активности.
const WATER_ML_PER_30_ACTIVE_MIN: f64 = 500.0;
/// Доп. калории за каждые 30 минут активности.
const KCAL_PER_30_ACTIVE_MIN: f64 = 200.0;
/// Доп. вода за каждые 30 минут тренировки.
const WATER_ML_PER_30_WORKOUT_MIN: f64 = 200.0;

const HOT_THRESHOLD_C: f64 = 30.0;
const WARM_THRESHOLD_C: f64 = 25.0;
const HOT_EXTRA_ML: u32 = 1000;
const WARM_EXTRA_ML: u32 = 500;

const DEFAULT_MET: f64 = 6.0;

/// Коэффициенты MET по названию тренировки (русские и английские названия).
const MET_TABLE: &[(&str, f64)] = &[
    ("бег", 9.8),
    ("running", 9.8),
    ("ходьба", 3.5),
    ("walking", 3.5),
    ("велосипед", 7.5),
    ("cycling", 7.5),
    ("плавание", 8.0),
    ("swimming", 8.0),
    ("силовая", 6.0),
    ("strength", 6.0),
    ("йога", 3.0),
    ("yoga", 3.0),
];

/// Дневная норма воды в мл.
///
/// Слагаемые веса и активности отбрасывают дробную часть по отдельности,
/// затем добавляются жара и тренировки. Неизвестная температура ничего не добавляет.
pub fn water_goal_ml(profile: &UserProfile, temp_c: Option<f64>, workout_extra_ml: u32) -> u32 {
    let base = (profile.weight_kg * WATER_ML_PER_KG) as u32;
    let activity_extra =
        ((profile.activity_minutes as f64 / 30.0) * WATER_ML_PER_30_ACTIVE_MIN) as u32;

    base.saturating_add(activity_extra)
        .saturating_add(heat_extra_ml(temp_c))
        .saturating_add(workout_extra_ml)
}

fn heat_extra_ml(temp_c: Option<f64>) -> u32 {
    match temp_c {
        Some(t) if t > HOT_THRESHOLD_C => HOT_EXTRA_ML,
        Some(t) if t > WARM_THRESHOLD_C => WARM_EXTRA_ML,
        _ => 0,
    }
}

/// Дневная норма калорий.
///
/// Миффлин-Сан Жеор без поправки на пол (пола в профиле нет).
/// Ручная цель всегда важнее.
pub fn calorie_goal(profile: &UserProfile) -> i64 {
    if let Some(goal) = profile.calorie_goal_override {
        return goal as i64;
    }

    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age_years as f64;
    let activity_extra = (profile.activity_minutes as f64 / 30.0) * KCAL_PER_30_ACTIVE_MIN;
    (base + activity_extra) as i64
}

/// MET по названию тренировки, без учёта регистра.
pub fn met_for(workout_type: &str) -> f64 {
    let key = workout_type.trim().to_lowercase();
    MET_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, met)| *met)
        .unwrap_or(DEFAULT_MET)
}

/// Сожжённые калории, округление к чётному.
pub fn calories_burned(workout_type: &str, minutes: u32, weight_kg: f64) -> u32 {
    let burned = met_for(workout_type) * weight_kg * (minutes as f64 / 60.0);
    burned.round_ties_even() as u32
}

pub fn extra_hydration_for_workout(minutes: u32) -> u32 {
    ((minutes as f64 / 30.0) * WATER_ML_PER_30_WORKOUT_MIN) as u32
}
