//! Тексты для пользователя.

use crate::models::{DailyLedger, FoodEntry, WorkoutEntry};

pub const HELP: &str = "Команды:\n\
    /set_profile\n\
    /log_water 250\n\
    /log_food банан\n\
    /log_workout бег 30\n\
    /check_progress\n\
    /cancel";

pub const NEED_PROFILE: &str = "Сначала /set_profile";
pub const IDLE_HINT: &str = "Не понял сообщение. Список команд: /start";
pub const CANCELLED: &str = "Действие отменено.";
pub const NOTHING_TO_CANCEL: &str = "Нечего отменять.";

pub const WATER_USAGE: &str = "Формат: /log_water 250";
pub const WATER_INVALID: &str = "Введите корректное число мл (например 250).";
pub const FOOD_USAGE: &str = "Формат: /log_food банан";
pub const WORKOUT_USAGE: &str = "Формат: /log_workout бег 30";
pub const WORKOUT_SHAPE: &str = "Формат: /log_workout <тип> <минуты>";
pub const WORKOUT_MINUTES_INVALID: &str = "Минуты должны быть числом (например 30).";

pub fn temperature(temp_c: Option<f64>) -> String {
    match temp_c {
        Some(t) => format!("{t:.1} C"),
        None => "нет данных".to_string(),
    }
}

pub fn profile_saved(temp_c: Option<f64>, water_goal: u32, calorie_goal: i64) -> String {
    format!(
        "Профиль сохранён.\n\
         Температура: {}\n\
         Норма воды: {} мл\n\
         Цель калорий: {} ккал",
        temperature(temp_c),
        water_goal,
        calorie_goal
    )
}

pub fn water_logged(drunk: u32, goal: u32) -> String {
    format!(
        "Вода записана.\n\
         Выпито: {} / {} мл\n\
         Осталось: {} мл",
        drunk,
        goal,
        goal.saturating_sub(drunk)
    )
}

pub fn food_logged(entry: &FoodEntry) -> String {
    format!("Еда записана: {}, {:.0} г, {:.0} ккал.", entry.name, entry.grams, entry.kcal)
}

pub fn workout_logged(entry: &WorkoutEntry) -> String {
    format!(
        "Тренировка записана.\n\
         Тип: {}\n\
         Время: {} мин\n\
         Сожжено: {} ккал\n\
         Доп. вода к норме: {} мл",
        entry.kind, entry.minutes, entry.kcal_burned, entry.extra_water_ml
    )
}

pub fn progress(ledger: &DailyLedger, temp_c: Option<f64>, water_goal: u32, calorie_goal: i64) -> String {
    let balance = ledger.calorie_balance();
    format!(
        "Прогресс за сегодня:\n\n\
         Температура: {}\n\n\
         Вода:\n\
         - Выпито: {} мл из {} мл\n\
         - Осталось: {} мл\n\n\
         Калории:\n\
         - Потреблено: {:.0} ккал\n\
         - Сожжено: {:.0} ккал\n\
         - Баланс: {:.0} ккал\n\
         - Цель: {} ккал\n\
         - Осталось до цели: {:.0} ккал",
        temperature(temp_c),
        ledger.water_ml,
        water_goal,
        water_goal.saturating_sub(ledger.water_ml),
        ledger.calories_in,
        ledger.calories_out,
        balance,
        calorie_goal,
        calorie_goal as f64 - balance
    )
}
