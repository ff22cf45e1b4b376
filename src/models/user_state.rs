use chrono::NaiveDate;
use std::collections::HashMap;

use super::{DailyLedger, UserProfile};
use crate::flows::Session;

/// Всё, что хранится в памяти для одного пользователя.
#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub profile: Option<UserProfile>,
    pub days: HashMap<NaiveDate, DailyLedger>,
    pub session: Option<Session>,
}
