use thiserror::Error;

/// Errors returned by the pairing algorithms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("must have an even number of participants, got {count}")]
    OddCount { count: usize },

    #[error("no solution possible")]
    NoSolution,

    #[error("participant {participant:?} appears more than once")]
    DuplicateParticipant { participant: String },

    #[error("pre-assigned pair {participant:?} -> {partner:?} is invalid: {reason}")]
    InvalidPartial {
        participant: String,
        partner: String,
        reason: &'static str,
    },
}

/// Reject odd or repeating rosters before any search
pub(crate) fn check_roster(participants: &[String]) -> Result<(), PairingError> {
    if participants.len() % 2 != 0 {
        return Err(PairingError::OddCount {
            count: participants.len(),
        });
    }

    let mut seen = std::collections::HashSet::with_capacity(participants.len());
    for p in participants {
        if !seen.insert(p.as_str()) {
            return Err(PairingError::DuplicateParticipant {
                participant: p.clone(),
            });
        }
    }

    Ok(())
}
