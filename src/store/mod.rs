use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use teloxide::types::UserId;
use tokio::sync::{Mutex, RwLock};

use crate::flows::Session;
use crate::models::{DailyLedger, LedgerEvent, UserProfile, UserState};

/// Хранилище данных пользователей для движка.
///
/// Дневные записи адресуются пользователем и днём, создаются при первом обращении.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn profile(&self, user: UserId) -> Option<UserProfile>;
    async fn put_profile(&self, user: UserId, profile: UserProfile);

    /// Копия дневной записи; пустая создаётся при необходимости.
    async fn ledger(&self, user: UserId, day: NaiveDate) -> DailyLedger;
    /// Применяет `event` и возвращает обновлённую копию.
    async fn record(&self, user: UserId, day: NaiveDate, event: LedgerEvent) -> DailyLedger;

    async fn session(&self, user: UserId) -> Option<Session>;
    async fn set_session(&self, user: UserId, session: Session);
    /// Сбрасывает сессию пользователя и возвращает её, если была.
    async fn clear_session(&self, user: UserId) -> Option<Session>;
}

type UserSlot = Arc<Mutex<UserState>>;

/// Хранилище в памяти. Блокировка карты нужна только для поиска слота
/// пользователя, дальше чтение и запись идут через его собственный mutex.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, UserSlot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn existing(&self, user: UserId) -> Option<UserSlot> {
        self.users.read().await.get(&user).cloned()
    }

    async fn slot(&self, user: UserId) -> UserSlot {
        if let Some(slot) = self.existing(user).await {
            return slot;
        }
        let mut users = self.users.write().await;
        users.entry(user).or_default().clone()
    }

    #[cfg(test)]
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn profile(&self, user: UserId) -> Option<UserProfile> {
        let slot = self.existing(user).await?;
        let state = slot.lock().await;
        state.profile.clone()
    }

    async fn put_profile(&self, user: UserId, profile: UserProfile) {
        let slot = self.slot(user).await;
        slot.lock().await.profile = Some(profile);
        log::debug!("💾 Profile stored for user {}", user.0);
    }

    async fn ledger(&self, user: UserId, day: NaiveDate) -> DailyLedger {
        let slot = self.slot(user).await;
        let mut state = slot.lock().await;
        state.days.entry(day).or_default().clone()
    }

    async fn record(&self, user: UserId, day: NaiveDate, event: LedgerEvent) -> DailyLedger {
        let slot = self.slot(user).await;
        let mut state = slot.lock().await;
        let ledger = state.days.entry(day).or_default();
        ledger.apply(event);
        log::debug!("💾 Ledger {} updated for user {}", day, user.0);
        ledger.clone()
    }

    async fn session(&self, user: UserId) -> Option<Session> {
        let slot = self.existing(user).await?;
        let state = slot.lock().await;
        state.session.clone()
    }

    async fn set_session(&self, user: UserId, session: Session) {
        let slot = self.slot(user).await;
        slot.lock().await.session = Some(session);
    }

    async fn clear_session(&self, user: UserId) -> Option<Session> {
        let slot = self.existing(user).await?;
        let mut state = slot.lock().await;
        state.session.take()
    }
}
