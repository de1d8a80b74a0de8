//! Coffee Roulette - pairs participants for repeated rounds
//!
//! This library provides the pairing engine: a backtracking matcher that
//! never repeats a pair recorded in history, a round-robin schedule
//! generator, and the history bookkeeping that ties rounds together.

pub mod commands;
pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{record_matching, round_robin_schedule, Matcher, PairingError};
pub use models::{History, Matching, OddPolicy, Participant, BLANK};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let people: Vec<Participant> = vec!["a".into(), "b".into()];
        let matching = Matcher::default().find_matching(&people, &History::new()).unwrap();
        assert_eq!(matching.partner("a").map(String::as_str), Some("b"));
    }
}
