// Service exports
pub mod history_store;
pub mod roster;

pub use history_store::{HistoryStore, StoreError};
pub use roster::{load_roster, parse_roster, RosterError};
