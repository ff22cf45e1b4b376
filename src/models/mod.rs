pub mod ledger;
pub mod profile;
pub mod user_state;

pub use ledger::{DailyLedger, FoodEntry, LedgerEvent, WorkoutEntry};
pub use profile::UserProfile;
pub use user_state::UserState;
