pub mod commands;
pub mod messages;

pub use commands::command_handler;
pub use messages::message_handler;

use std::error::Error;
use teloxide::types::{Message, UserId};

pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Отправитель сообщения (у постов канала его нет).
pub fn sender(msg: &Message) -> Option<UserId> {
    msg.from.as_ref().map(|user| user.id)
}
