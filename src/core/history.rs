use crate::models::{History, Matching};
use chrono::{DateTime, Utc};

/// Fold a matching into the pairing history
///
/// Every directed entry `p -> q` sets `history[p][q] = now`, so both
/// directions of each pair are stamped. Entries are never removed.
pub fn record_matching<'h>(
    history: &'h mut History,
    matching: &Matching,
    now: DateTime<Utc>,
) -> &'h mut History {
    for (p, q) in matching {
        history.entry(p.clone()).or_default().insert(q.clone(), now);
    }
    history
}

/// Whether `p` has been paired with `q` before
pub fn has_paired(history: &History, p: &str, q: &str) -> bool {
    last_paired(history, p, q).is_some()
}

/// When `p` was last paired with `q`
pub fn last_paired(history: &History, p: &str, q: &str) -> Option<DateTime<Utc>> {
    history.get(p).and_then(|partners| partners.get(q)).copied()
}
