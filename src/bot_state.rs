use chrono::{Local, NaiveDate};
use std::sync::Arc;
use teloxide::types::UserId;

use crate::flows::food::NOT_FOUND_PROMPT;
use crate::flows::{integer_in_range, FoodFlow, FoodTransition, ProfileFlow, ProfileStep, ProfileTransition, Session, Validated};
use crate::goals;
use crate::matcher::match_food;
use crate::models::{LedgerEvent, UserProfile, WorkoutEntry};
use crate::providers::{FoodProvider, TemperatureProvider};
use crate::replies;
use crate::store::UserStore;

const WATER_ML_MAX: i64 = 5000;
const WORKOUT_MINUTES_MAX: i64 = 600;

/// Входящее сообщение, уже разобранное транспортом.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    Start,
    SetProfile,
    LogWater(&'a str),
    LogFood(&'a str),
    LogWorkout(&'a str),
    CheckProgress,
    Cancel,
    Text(&'a str),
}

/// Движок диалогов, общий для всех обработчиков.
#[derive(Clone)]
pub struct BotState {
    store: Arc<dyn UserStore>,
    weather: Arc<dyn TemperatureProvider>,
    food: Arc<dyn FoodProvider>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl BotState {
    pub fn new(
        store: Arc<dyn UserStore>,
        weather: Arc<dyn TemperatureProvider>,
        food: Arc<dyn FoodProvider>,
    ) -> Self {
        Self {
            store,
            weather,
            food,
            today: local_today,
        }
    }

    /// Подменяет источник «сегодня» для дневных записей.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Обрабатывает одно сообщение и возвращает ответ, если он есть.
    ///
    /// Пока идёт сценарий, он получает любое сообщение как текст, кроме
    /// команд, которые запускают новый сценарий или отменяют текущий.
    /// `raw_text` это то, что пользователь реально ввёл.
    pub async fn handle(&self, user: UserId, request: Request<'_>, raw_text: &str) -> Option<String> {
        match request {
            Request::SetProfile => return Some(self.start_profile(user).await),
            Request::LogFood(query) => return Some(self.start_food(user, query).await),
            Request::Cancel => return Some(self.cancel(user).await),
            _ => {}
        }

        if let Some(session) = self.store.session(user).await {
            return Some(self.continue_session(user, session, raw_text).await);
        }

        match request {
            Request::Start => Some(replies::HELP.to_string()),
            Request::LogWater(args) => Some(self.log_water(user, args).await),
            Request::LogWorkout(args) => Some(self.log_workout(user, args).await),
            Request::CheckProgress => Some(self.check_progress(user).await),
            Request::Text(_) => None,
            Request::SetProfile | Request::LogFood(_) | Request::Cancel => None,
        }
    }

    pub async fn start_profile(&self, user: UserId) -> String {
        self.store.set_session(user, Session::Profile(ProfileFlow::new())).await;
        log::info!("📝 Profile setup started for user {}", user.0);
        ProfileStep::Weight.prompt().to_string()
    }

    pub async fn start_food(&self, user: UserId, args: &str) -> String {
        if self.store.profile(user).await.is_none() {
            return replies::NEED_PROFILE.to_string();
        }
        let query = args.trim();
        if query.is_empty() {
            return replies::FOOD_USAGE.to_string();
        }

        self.store.clear_session(user).await;

        let (flow, prompt) = match match_food(self.food.as_ref(), query).await {
            Some(found) => {
                log::info!("🍽️ {:?} matched {:?} ({:.0} kcal/100g)", query, found.name, found.kcal_per_100g);
                let flow = FoodFlow::matched(found.name, found.kcal_per_100g);
                let prompt = flow.prompt();
                (flow, prompt)
            }
            None => {
                log::info!("🍽️ No match for {:?}, asking for manual energy", query);
                (FoodFlow::manual(query), NOT_FOUND_PROMPT.to_string())
            }
        };

        self.store.set_session(user, Session::Food(flow)).await;
        prompt
    }

    pub async fn cancel(&self, user: UserId) -> String {
        match self.store.clear_session(user).await {
            Some(session) => {
                log::info!("🚫 {} flow cancelled by user {}", session.name(), user.0);
                replies::CANCELLED.to_string()
            }
            None => replies::NOTHING_TO_CANCEL.to_string(),
        }
    }

    async fn continue_session(&self, user: UserId, session: Session, text: &str) -> String {
        match session {
            Session::Profile(flow) => match flow.advance(text) {
                ProfileTransition::Advance(flow, reply) | ProfileTransition::Retry(flow, reply) => {
                    self.store.set_session(user, Session::Profile(flow)).await;
                    reply.to_string()
                }
                ProfileTransition::Completed(profile) => {
                    self.store.clear_session(user).await;
                    self.finish_profile(user, profile).await
                }
            },
            Session::Food(flow) => match flow.advance(text) {
                FoodTransition::Advance(flow, reply) => {
                    self.store.set_session(user, Session::Food(flow)).await;
                    reply
                }
                FoodTransition::Retry(flow, reason) => {
                    self.store.set_session(user, Session::Food(flow)).await;
                    reason.to_string()
                }
                FoodTransition::Completed(entry) => {
                    self.store.clear_session(user).await;
                    let reply = replies::food_logged(&entry);
                    self.store.record(user, (self.today)(), LedgerEvent::Food(entry)).await;
                    log::info!("🍽️ Food logged for user {}", user.0);
                    reply
                }
            },
        }
    }

    async fn finish_profile(&self, user: UserId, profile: UserProfile) -> String {
        self.store.put_profile(user, profile.clone()).await;
        let ledger = self.store.ledger(user, (self.today)()).await;

        let temp = self.weather.current_temperature(&profile.city).await.found();
        let water_goal = goals::water_goal_ml(&profile, temp, ledger.workout_extra_water_ml);
        let calorie_goal = goals::calorie_goal(&profile);

        log::info!(
            "✅ Profile saved for user {}: water {} ml, calories {} kcal",
            user.0,
            water_goal,
            calorie_goal
        );
        replies::profile_saved(temp, water_goal, calorie_goal)
    }

    pub async fn log_water(&self, user: UserId, args: &str) -> String {
        let Some(profile) = self.store.profile(user).await else {
            return replies::NEED_PROFILE.to_string();
        };
        if args.trim().is_empty() {
            return replies::WATER_USAGE.to_string();
        }
        let ml = match integer_in_range(args, 1, WATER_ML_MAX, replies::WATER_INVALID) {
            Validated::Valid(ml) => ml,
            Validated::Invalid(reason) => return reason.to_string(),
        };

        let ledger = self.store.record(user, (self.today)(), LedgerEvent::Water { ml }).await;
        let temp = self.weather.current_temperature(&profile.city).await.found();
        let goal = goals::water_goal_ml(&profile, temp, ledger.workout_extra_water_ml);

        log::info!("💧 {} ml logged for user {}", ml, user.0);
        replies::water_logged(ledger.water_ml, goal)
    }

    pub async fn log_workout(&self, user: UserId, args: &str) -> String {
        let Some(profile) = self.store.profile(user).await else {
            return replies::NEED_PROFILE.to_string();
        };
        if args.trim().is_empty() {
            return replies::WORKOUT_USAGE.to_string();
        }
        let parts: Vec<&str> = args.split_whitespace().collect();
        let Some((minutes, kind)) = parts.split_last().filter(|(_, kind)| !kind.is_empty()) else {
            return replies::WORKOUT_SHAPE.to_string();
        };
        let minutes = match integer_in_range(minutes, 1, WORKOUT_MINUTES_MAX, replies::WORKOUT_MINUTES_INVALID) {
            Validated::Valid(m) => m,
            Validated::Invalid(reason) => return reason.to_string(),
        };

        let kind = kind.join(" ");
        let entry = WorkoutEntry {
            kcal_burned: goals::calories_burned(&kind, minutes, profile.weight_kg),
            extra_water_ml: goals::extra_hydration_for_workout(minutes),
            kind,
            minutes,
        };
        let reply = replies::workout_logged(&entry);
        self.store.record(user, (self.today)(), LedgerEvent::Workout(entry)).await;

        log::info!("🏋️ Workout logged for user {}", user.0);
        reply
    }

    pub async fn check_progress(&self, user: UserId) -> String {
        let Some(profile) = self.store.profile(user).await else {
            return replies::NEED_PROFILE.to_string();
        };

        let ledger = self.store.ledger(user, (self.today)()).await;
        let temp = self.weather.current_temperature(&profile.city).await.found();
        let water_goal = goals::water_goal_ml(&profile, temp, ledger.workout_extra_water_ml);
        let calorie_goal = goals::calorie_goal(&profile);

        replies::progress(&ledger, temp, water_goal, calorie_goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{kcal, FixedFood, FixedTemperature};
    use crate::store::MemoryStore;

    const ME: UserId = UserId(100);
    const OTHER: UserId = UserId(200);

    struct Harness {
        state: BotState,
        store: Arc<MemoryStore>,
        food: Arc<FixedFood>,
    }

    fn harness(temp: Option<f64>, food: FixedFood) -> Harness {
        let store = Arc::new(MemoryStore::new());
        let food = Arc::new(food);
        let state = BotState::new(store.clone(), Arc::new(FixedTemperature(temp)), food.clone())
            .with_clock(|| NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        Harness { state, store, food }
    }

    impl Harness {
        async fn text(&self, user: UserId, text: &str) -> Option<String> {
            self.state.handle(user, Request::Text(text), text).await
        }

        async fn command(&self, user: UserId, request: Request<'_>, raw: &str) -> String {
            self.state.handle(user, request, raw).await.expect("commands always reply")
        }

        async fn onboard(&self, user: UserId, answers: [&str; 6]) -> String {
            self.command(user, Request::SetProfile, "/set_profile").await;
            let mut last = None;
            for answer in answers {
                last = self.text(user, answer).await;
            }
            last.unwrap()
        }
    }

    const REFERENCE: [&str; 6] = ["80", "184", "26", "45", "X", "нет"];

    #[tokio::test]
    async fn onboarding_reports_goals() {
        let h = harness(None, FixedFood::unavailable());
        let reply = h.onboard(ME, REFERENCE).await;

        assert_eq!(
            reply,
            "Профиль сохранён.\nТемпература: нет данных\nНорма воды: 3150 мл\nЦель калорий: 2120 ккал"
        );
        assert_eq!(h.store.session(ME).await, None);
        assert_eq!(h.store.profile(ME).await.unwrap().city, "X");
    }

    #[tokio::test]
    async fn onboarding_uses_temperature_and_override() {
        let h = harness(Some(31.2), FixedFood::unavailable());
        let reply = h.onboard(ME, ["80", "184", "26", "45", "Сочи", "2200"]).await;
        assert!(reply.contains("Температура: 31.2 C"));
        assert!(reply.contains("Норма воды: 4150 мл"));
        assert!(reply.contains("Цель калорий: 2200 ккал"));
    }

    #[tokio::test]
    async fn invalid_answer_reprompts() {
        let h = harness(None, FixedFood::unavailable());
        assert_eq!(h.command(ME, Request::SetProfile, "/set_profile").await, "Введите вес (кг):");
        assert_eq!(h.text(ME, "тяжёлый").await.unwrap(), "Введите корректный вес (например 80).");
        assert_eq!(h.text(ME, "80").await.unwrap(), "Введите рост (см):");
    }

    #[tokio::test]
    async fn water_twice() {
        let h = harness(None, FixedFood::unavailable());
        h.onboard(ME, REFERENCE).await;

        h.command(ME, Request::LogWater("250"), "/log_water 250").await;
        let reply = h.command(ME, Request::LogWater(" 250 "), "/log_water  250 ").await;
        assert_eq!(reply, "Вода записана.\nВыпито: 500 / 3150 мл\nОсталось: 2650 мл");
    }

    #[tokio::test]
    async fn water_validation() {
        let h = harness(None, FixedFood::unavailable());
        assert_eq!(h.command(ME, Request::LogWater("250"), "/log_water 250").await, replies::NEED_PROFILE);

        h.onboard(ME, REFERENCE).await;
        assert_eq!(h.command(ME, Request::LogWater(""), "/log_water").await, replies::WATER_USAGE);
        for bad in ["0", "5001", "-5", "стакан", "2.5"] {
            assert_eq!(h.command(ME, Request::LogWater(bad), "/log_water").await, replies::WATER_INVALID);
        }
        let ledger = h.store.ledger(ME, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()).await;
        assert_eq!(ledger.water_ml, 0);
    }

    #[tokio::test]
    async fn workout_shows_in_progress() {
        let h = harness(None, FixedFood::unavailable());
        h.onboard(ME, REFERENCE).await;

        let reply = h.command(ME, Request::LogWorkout("плавание 40"), "/log_workout плавание 40").await;
        assert_eq!(
            reply,
            "Тренировка записана.\nТип: плавание\nВремя: 40 мин\nСожжено: 427 ккал\nДоп. вода к норме: 266 мл"
        );

        let progress = h.command(ME, Request::CheckProgress, "/check_progress").await;
        assert!(progress.contains("- Выпито: 0 мл из 3416 мл"));
        assert!(progress.contains("- Осталось: 3416 мл"));
        assert!(progress.contains("- Сожжено: 427 ккал"));
        assert!(progress.contains("- Баланс: -427 ккал"));
        assert!(progress.contains("- Цель: 2120 ккал"));
        assert!(progress.contains("- Осталось до цели: 2547 ккал"));
    }

    #[tokio::test]
    async fn workout_validation() {
        let h = harness(None, FixedFood::unavailable());
        h.onboard(ME, REFERENCE).await;

        assert_eq!(h.command(ME, Request::LogWorkout(""), "/log_workout").await, replies::WORKOUT_USAGE);
        assert_eq!(h.command(ME, Request::LogWorkout("бег"), "/log_workout бег").await, replies::WORKOUT_SHAPE);
        assert_eq!(
            h.command(ME, Request::LogWorkout("бег долго"), "/log_workout бег долго").await,
            replies::WORKOUT_MINUTES_INVALID
        );
        assert_eq!(
            h.command(ME, Request::LogWorkout("бег 601"), "/log_workout бег 601").await,
            replies::WORKOUT_MINUTES_INVALID
        );

        let reply = h
            .command(ME, Request::LogWorkout("силовая тренировка 60"), "/log_workout силовая тренировка 60")
            .await;
        assert!(reply.contains("Тип: силовая тренировка"));
        assert!(reply.contains("Сожжено: 480 ккал"));
    }

    #[tokio::test]
    async fn food_with_match() {
        let h = harness(None, FixedFood::with(vec![kcal("Банан", 89.0), kcal("Чипсы банановые", 520.0)]));
        h.onboard(ME, REFERENCE).await;

        let prompt = h.command(ME, Request::LogFood("банан"), "/log_food банан").await;
        assert_eq!(prompt, "Банан 89 ккал/100г. Сколько грамм?");

        assert_eq!(h.text(ME, "много").await.unwrap(), "Введите граммы числом (например 150).");
        assert_eq!(h.text(ME, "200").await.unwrap(), "Еда записана: Банан, 200 г, 178 ккал.");
        assert_eq!(h.store.session(ME).await, None);

        let progress = h.command(ME, Request::CheckProgress, "/check_progress").await;
        assert!(progress.contains("- Потреблено: 178 ккал"));
        assert!(progress.contains("- Осталось до цели: 1942 ккал"));
    }

    #[tokio::test]
    async fn food_without_match_asks_for_energy() {
        let h = harness(None, FixedFood::unavailable());
        h.onboard(ME, REFERENCE).await;

        let prompt = h.command(ME, Request::LogFood(" бабушкин пирог "), "/log_food бабушкин пирог").await;
        assert_eq!(prompt, NOT_FOUND_PROMPT);
        assert_eq!(h.text(ME, "300").await.unwrap(), "бабушкин пирог 300 ккал/100г. Сколько грамм?");
        assert_eq!(h.text(ME, "50").await.unwrap(), "Еда записана: бабушкин пирог, 50 г, 150 ккал.");
        assert_eq!(h.food.queries(), ["бабушкин пирог"]);
    }

    #[tokio::test]
    async fn food_needs_profile_and_query() {
        let h = harness(None, FixedFood::with(vec![kcal("Банан", 89.0)]));
        assert_eq!(h.command(ME, Request::LogFood("банан"), "/log_food банан").await, replies::NEED_PROFILE);
        assert_eq!(h.food.calls(), 0);
        assert_eq!(h.store.session(ME).await, None);

        h.onboard(ME, REFERENCE).await;
        assert_eq!(h.command(ME, Request::LogFood("  "), "/log_food").await, replies::FOOD_USAGE);
        assert_eq!(h.food.calls(), 0);
    }

    #[tokio::test]
    async fn active_flow_consumes_other_commands() {
        let h = harness(None, FixedFood::unavailable());
        h.onboard(ME, REFERENCE).await;
        h.command(ME, Request::SetProfile, "/set_profile").await;

        let reply = h.command(ME, Request::LogWater("250"), "/log_water 250").await;
        assert_eq!(reply, "Введите корректный вес (например 80).");
        let ledger = h.store.ledger(ME, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()).await;
        assert_eq!(ledger.water_ml, 0);

        let reply = h.command(ME, Request::CheckProgress, "/check_progress").await;
        assert_eq!(reply, "Введите корректный вес (например 80).");
    }

    #[tokio::test]
    async fn new_flow_supersedes_old_one() {
        let h = harness(None, FixedFood::unavailable());
        h.onboard(ME, REFERENCE).await;

        h.command(ME, Request::SetProfile, "/set_profile").await;
        h.text(ME, "90").await;
        h.command(ME, Request::LogFood("суп"), "/log_food суп").await;
        assert!(matches!(h.store.session(ME).await, Some(Session::Food(_))));

        // Повторный /set_profile начинает с первого вопроса.
        assert_eq!(h.command(ME, Request::SetProfile, "/set_profile").await, "Введите вес (кг):");
        assert_eq!(h.store.session(ME).await, Some(Session::Profile(ProfileFlow::new())));
        // Старый профиль не меняется, пока новый не заполнен.
        assert_eq!(h.store.profile(ME).await.unwrap().weight_kg, 80.0);
    }

    #[tokio::test]
    async fn cancel_drops_session() {
        let h = harness(None, FixedFood::unavailable());
        assert_eq!(h.command(ME, Request::Cancel, "/cancel").await, replies::NOTHING_TO_CANCEL);

        h.command(ME, Request::SetProfile, "/set_profile").await;
        assert_eq!(h.command(ME, Request::Cancel, "/cancel").await, replies::CANCELLED);
        assert_eq!(h.store.session(ME).await, None);
        assert_eq!(h.text(ME, "80").await, None);
    }

    #[tokio::test]
    async fn idle_text_is_a_no_op() {
        let h = harness(None, FixedFood::unavailable());
        assert_eq!(h.text(ME, "привет").await, None);
        assert_eq!(h.store.user_count().await, 0);

        h.onboard(ME, REFERENCE).await;
        let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let before = h.store.ledger(ME, day).await;
        assert_eq!(h.text(ME, "250").await, None);
        assert_eq!(h.store.ledger(ME, day).await, before);
        assert_eq!(h.store.session(ME).await, None);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let h = harness(None, FixedFood::unavailable());
        h.onboard(ME, REFERENCE).await;
        h.command(OTHER, Request::SetProfile, "/set_profile").await;

        h.command(ME, Request::LogWater("300"), "/log_water 300").await;
        assert_eq!(h.text(OTHER, "65").await.unwrap(), "Введите рост (см):");
        assert_eq!(h.command(OTHER, Request::Cancel, "/cancel").await, replies::CANCELLED);
        assert_eq!(h.command(OTHER, Request::CheckProgress, "/check_progress").await, replies::NEED_PROFILE);

        let progress = h.command(ME, Request::CheckProgress, "/check_progress").await;
        assert!(progress.contains("- Выпито: 300 мл из 3150 мл"));
    }

    #[tokio::test]
    async fn ledgers_roll_over_with_the_day() {
        let store = Arc::new(MemoryStore::new());
        let food = Arc::new(FixedFood::unavailable());
        let weather = Arc::new(FixedTemperature(None));
        let monday = BotState::new(store.clone(), weather.clone(), food.clone())
            .with_clock(|| NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let tuesday = BotState::new(store.clone(), weather, food)
            .with_clock(|| NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());

        monday.handle(ME, Request::SetProfile, "/set_profile").await;
        for answer in REFERENCE {
            monday.handle(ME, Request::Text(answer), answer).await;
        }
        monday.handle(ME, Request::LogWater("1000"), "/log_water 1000").await;

        let reply = tuesday.handle(ME, Request::LogWater("200"), "/log_water 200").await.unwrap();
        assert!(reply.contains("Выпито: 200 / 3150 мл"));
        assert_eq!(store.ledger(ME, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()).await.water_ml, 1000);
    }
}
