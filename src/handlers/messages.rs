use teloxide::prelude::*;

use crate::bot_state::{BotState, Request};
use crate::handlers::{sender, HandlerResult};
use crate::replies;

/// Обычные сообщения и неизвестные команды. Нетекстовые сообщения идут
/// как пустой текст, и активный сценарий переспрашивает.
pub async fn message_handler(bot: Bot, msg: Message, state: BotState) -> HandlerResult {
    let Some(user) = sender(&msg) else {
        return Ok(());
    };
    let text = msg.text().unwrap_or_default();

    let reply = state
        .handle(user, Request::Text(text), text)
        .await
        .unwrap_or_else(|| replies::IDLE_HINT.to_string());

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
