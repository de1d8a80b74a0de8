// Model exports
pub mod domain;
pub mod responses;

pub use domain::{pad_to_even, History, Matching, OddPolicy, Participant, BLANK};
pub use responses::{MatchingReport, Pair, ScheduleReport, ScheduleRound};
