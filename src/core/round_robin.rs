use crate::core::error::{check_roster, PairingError};
use crate::models::{Matching, Participant};

/// Generate a full round-robin schedule, ignoring history
///
/// Returns `N - 1` matchings in which every unordered pair of participants
/// meets exactly once. Uses the circle method: the last participant stays
/// put while the other `N - 1` rotate one seat per round, and each round
/// pairs seats mirrored around the rotation point.
pub fn round_robin_schedule(participants: &[Participant]) -> Result<Vec<Matching>, PairingError> {
    check_roster(participants)?;

    let n = participants.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let fixed = &participants[n - 1];
    let ring = n - 1;

    let rounds: Vec<Matching> = (0..ring)
        .map(|round| {
            let mut matching = Matching::new();
            matching.assign(fixed, &participants[round]);

            for k in 1..n / 2 {
                let a = (round + k) % ring;
                let b = (round + ring - k) % ring;
                matching.assign(&participants[a], &participants[b]);
            }

            matching
        })
        .collect();

    tracing::debug!("Generated {} rounds for {} participants", rounds.len(), n);

    Ok(rounds)
}
