use teloxide::prelude::*;

use crate::bot_state::{BotState, Request};
use crate::handlers::{sender, HandlerResult};
use crate::Command;

pub async fn command_handler(bot: Bot, msg: Message, cmd: Command, state: BotState) -> HandlerResult {
    let Some(user) = sender(&msg) else {
        return Ok(());
    };
    let raw_text = msg.text().unwrap_or_default();

    let request = match &cmd {
        Command::Start | Command::Help => Request::Start,
        Command::SetProfile => Request::SetProfile,
        Command::LogWater(args) => Request::LogWater(args),
        Command::LogFood(args) => Request::LogFood(args),
        Command::LogWorkout(args) => Request::LogWorkout(args),
        Command::CheckProgress => Request::CheckProgress,
        Command::Cancel => Request::Cancel,
    };

    if let Some(reply) = state.handle(user, request, raw_text).await {
        bot.send_message(msg.chat.id, reply).await?;
    }
    Ok(())
}
