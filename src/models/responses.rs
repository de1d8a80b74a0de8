use serde::{Deserialize, Serialize};

/// One pair in a rendered result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub first: String,
    pub second: String,
}

impl From<(String, String)> for Pair {
    fn from((first, second): (String, String)) -> Self {
        Self { first, second }
    }
}

/// Result of the `match` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingReport {
    pub solved: bool,
    pub pairs: Vec<Pair>,
    pub participants: usize,
    #[serde(rename = "historySaved")]
    pub history_saved: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// One round of the `schedule` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRound {
    pub round: usize,
    pub pairs: Vec<Pair>,
}

/// Result of the `schedule` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub rounds: Vec<ScheduleRound>,
    pub participants: usize,
}
