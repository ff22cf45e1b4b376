use std::sync::Arc;
use teloxide::{prelude::*, utils::command::BotCommands};

mod bot_state;
mod config;
mod flows;
mod goals;
mod handlers;
mod matcher;
mod models;
mod providers;
mod replies;
mod store;

use crate::bot_state::BotState;
use crate::config::AppConfig;
use crate::handlers::{command_handler, message_handler};
use crate::providers::{OpenFoodFactsClient, OpenWeatherClient};
use crate::store::MemoryStore;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "список команд")]
    Start,
    #[command(description = "список команд")]
    Help,
    #[command(description = "заполнить профиль")]
    SetProfile,
    #[command(description = "записать воду, мл: /log_water 250")]
    LogWater(String),
    #[command(description = "записать еду: /log_food банан")]
    LogFood(String),
    #[command(description = "записать тренировку: /log_workout бег 30")]
    LogWorkout(String),
    #[command(description = "прогресс за сегодня")]
    CheckProgress,
    #[command(description = "отменить текущий ввод")]
    Cancel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Загружаем .env и инициализируем логирование
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting hydration bot...");

    let config = AppConfig::from_env()?;
    if config.weather_api_key.is_none() {
        log::warn!("⚠️ OWM_API_KEY is not set, temperature will be reported as unknown");
    }

    // Клиенты внешних сервисов; ошибка сборки HTTP-клиента останавливает запуск
    let mut weather = OpenWeatherClient::new(config.weather_api_key.clone(), config.http_timeout)?;
    if let Some(url) = &config.weather_api_url {
        weather = weather.with_base_url(url.clone());
    }
    let mut food = OpenFoodFactsClient::new(config.http_timeout)?;
    if let Some(url) = &config.food_api_url {
        food = food.with_base_url(url.clone());
    }

    let state = BotState::new(Arc::new(MemoryStore::new()), Arc::new(weather), Arc::new(food));

    let bot = Bot::new(config.bot_token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("⚠️ Could not register command list: {}", e);
    }

    let handler = Update::filter_message()
        .inspect(|msg: Message| {
            let user = handlers::sender(&msg).map(|id| id.0);
            log::info!("user={:?} text={:?}", user, msg.text());
        })
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(dptree::endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
