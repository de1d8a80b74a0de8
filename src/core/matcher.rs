use crate::core::error::{check_roster, PairingError};
use crate::models::{pad_to_even, History, Matching, OddPolicy, Participant};

/// Backtracking matcher - pairs everyone with someone they have not met before
///
/// # Search
/// 1. Take the first unassigned participant `p` (roster order)
/// 2. Try each unassigned `q` (roster order) not already in `history[p]`
/// 3. Recurse; on failure undo `p <-> q` and try the next `q`
///
/// The search is exhaustive, so [`PairingError::NoSolution`] means no
/// perfect matching avoids every recorded pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    odd_policy: OddPolicy,
}

impl Matcher {
    pub fn new(odd_policy: OddPolicy) -> Self {
        Self { odd_policy }
    }

    /// Find a matching over `participants` that repeats no pair in `history`
    pub fn find_matching(
        &self,
        participants: &[Participant],
        history: &History,
    ) -> Result<Matching, PairingError> {
        let mut result = Matching::new();
        self.extend_matching(participants, history, &mut result)?;
        Ok(result)
    }

    /// Complete `partial` into a matching over `participants`
    ///
    /// Participants already assigned in `partial` keep their partners; every
    /// pre-assigned pair must be a symmetric, non-repeating pair of roster
    /// members. On error `partial` is left exactly as it was passed in.
    pub fn extend_matching(
        &self,
        participants: &[Participant],
        history: &History,
        partial: &mut Matching,
    ) -> Result<(), PairingError> {
        let roster = match self.odd_policy {
            OddPolicy::Reject => participants.to_vec(),
            OddPolicy::Pad => pad_to_even(participants),
        };
        check_roster(&roster)?;
        check_partial(&roster, history, partial)?;

        tracing::debug!(
            "Searching for a matching over {} participants ({} pre-assigned)",
            roster.len(),
            partial.len()
        );

        if search(&roster, history, partial) {
            tracing::debug!("Found matching with {} pairs", partial.len() / 2);
            Ok(())
        } else {
            tracing::debug!("Search exhausted for {} participants", roster.len());
            Err(PairingError::NoSolution)
        }
    }
}

/// Reject pre-assigned pairs the search could never have produced
fn check_partial(
    participants: &[Participant],
    history: &History,
    partial: &Matching,
) -> Result<(), PairingError> {
    for (p, q) in partial {
        let invalid = |reason| PairingError::InvalidPartial {
            participant: p.clone(),
            partner: q.clone(),
            reason,
        };

        if !participants.contains(p) || !participants.contains(q) {
            return Err(invalid("not on the roster"));
        }
        if p == q {
            return Err(invalid("self-pairing"));
        }
        if partial.partner(q) != Some(p) {
            return Err(invalid("not symmetric"));
        }
        if history.get(p).is_some_and(|partners| partners.contains_key(q)) {
            return Err(invalid("already paired before"));
        }
    }

    Ok(())
}

/// Depth-first search; leaves `result` untouched when it returns false
fn search(participants: &[Participant], history: &History, result: &mut Matching) -> bool {
    let Some(p) = participants.iter().find(|p| !result.is_assigned(p)) else {
        return true;
    };
    let met = history.get(p);

    for q in participants {
        if q == p || result.is_assigned(q) {
            continue;
        }
        if met.is_some_and(|partners| partners.contains_key(q)) {
            continue;
        }

        result.assign(p, q);
        if search(participants, history, result) {
            return true;
        }
        tracing::trace!("Backtracking {} <-> {}", p, q);
        result.unassign(p, q);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::record_matching;
    use crate::models::BLANK;
    use chrono::Utc;

    fn roster(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn history_of(pairs: &[(&str, &str)]) -> History {
        let mut history = History::new();
        for (p, q) in pairs {
            let mut matching = Matching::new();
            matching.assign(p, q);
            record_matching(&mut history, &matching, Utc::now());
        }
        history
    }

    #[test]
    fn test_empty_history_first_choice() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c", "d"]);

        let result = matcher.find_matching(&people, &History::new()).unwrap();

        assert!(result.validate(&people).is_ok());
        // Roster order decides: a takes b, then c takes d
        assert_eq!(result.partner("a").map(String::as_str), Some("b"));
        assert_eq!(result.partner("c").map(String::as_str), Some("d"));
    }

    #[test]
    fn test_avoids_previous_pairs() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c", "d"]);
        let history = history_of(&[("a", "b"), ("c", "d")]);

        let result = matcher.find_matching(&people, &history).unwrap();

        assert!(result.validate(&people).is_ok());
        assert_ne!(result.partner("a").map(String::as_str), Some("b"));
        assert_ne!(result.partner("c").map(String::as_str), Some("d"));
    }

    #[test]
    fn test_backtracks_out_of_dead_end() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c", "d"]);
        // a-b would force c-d, which is taken
        let history = history_of(&[("c", "d")]);

        let result = matcher.find_matching(&people, &history).unwrap();

        assert_eq!(result.partner("a").map(String::as_str), Some("c"));
        assert_eq!(result.partner("b").map(String::as_str), Some("d"));
    }

    #[test]
    fn test_odd_roster_rejected() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c"]);

        assert_eq!(
            matcher.find_matching(&people, &History::new()),
            Err(PairingError::OddCount { count: 3 })
        );
    }

    #[test]
    fn test_odd_roster_padded() {
        let matcher = Matcher::new(OddPolicy::Pad);
        let people = roster(&["a", "b", "c"]);

        let result = matcher.find_matching(&people, &History::new()).unwrap();

        assert_eq!(result.len(), 4);
        assert!(result.is_assigned(BLANK));
    }

    #[test]
    fn test_exhausted_history_no_solution() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c", "d"]);
        let history = history_of(&[
            ("a", "b"),
            ("c", "d"),
            ("a", "c"),
            ("b", "d"),
            ("a", "d"),
            ("b", "c"),
        ]);

        assert_eq!(
            matcher.find_matching(&people, &history),
            Err(PairingError::NoSolution)
        );
    }

    #[test]
    fn test_failed_extend_restores_partial() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c", "d"]);
        let history = history_of(&[("c", "d")]);

        let mut partial = Matching::new();
        partial.assign("a", "b");
        let before = partial.clone();

        assert_eq!(
            matcher.extend_matching(&people, &history, &mut partial),
            Err(PairingError::NoSolution)
        );
        assert_eq!(partial, before);
    }

    #[test]
    fn test_extend_rejects_repeated_preassigned_pair() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c", "d"]);
        let history = history_of(&[("a", "b")]);

        let mut partial = Matching::new();
        partial.assign("a", "b");
        let before = partial.clone();

        let result = matcher.extend_matching(&people, &history, &mut partial);

        assert!(matches!(
            result,
            Err(PairingError::InvalidPartial { reason: "already paired before", .. })
        ));
        assert_eq!(partial, before);
    }

    #[test]
    fn test_extend_rejects_preassigned_outsiders() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c", "d"]);

        let mut partial = Matching::new();
        partial.assign("x", "y");
        let before = partial.clone();

        let result = matcher.extend_matching(&people, &History::new(), &mut partial);

        assert!(matches!(
            result,
            Err(PairingError::InvalidPartial { reason: "not on the roster", .. })
        ));
        assert_eq!(partial, before);
    }

    #[test]
    fn test_extend_keeps_preassigned_pairs() {
        let matcher = Matcher::default();
        let people = roster(&["a", "b", "c", "d"]);

        let mut partial = Matching::new();
        partial.assign("a", "d");
        matcher
            .extend_matching(&people, &History::new(), &mut partial)
            .unwrap();

        assert_eq!(partial.partner("a").map(String::as_str), Some("d"));
        assert_eq!(partial.partner("b").map(String::as_str), Some("c"));
    }
}
