use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque participant identifier
pub type Participant = String;

/// Placeholder used to pad an odd roster to even size.
///
/// Roster files never yield an empty name, so it cannot collide with a real participant.
pub const BLANK: &str = "";

/// Past pairings: participant -> partner -> when they were last paired
pub type History = BTreeMap<Participant, BTreeMap<Participant, DateTime<Utc>>>;

/// One round of pairings
///
/// Every entry is stored in both directions, so `partner(a) == Some(b)`
/// implies `partner(b) == Some(a)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    partners: BTreeMap<Participant, Participant>,
}

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `p` and `q` in both directions
    pub fn assign(&mut self, p: &str, q: &str) {
        self.partners.insert(p.to_string(), q.to_string());
        self.partners.insert(q.to_string(), p.to_string());
    }

    /// Remove the pairing of `p` and `q`
    pub fn unassign(&mut self, p: &str, q: &str) {
        self.partners.remove(p);
        self.partners.remove(q);
    }

    pub fn partner(&self, p: &str) -> Option<&Participant> {
        self.partners.get(p)
    }

    pub fn is_assigned(&self, p: &str) -> bool {
        self.partners.contains_key(p)
    }

    /// Number of entries (twice the number of pairs)
    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// Each unordered pair once, smaller name first
    pub fn pairs(&self) -> Vec<(Participant, Participant)> {
        self.partners
            .iter()
            .filter(|(p, q)| p <= q)
            .map(|(p, q)| (p.clone(), q.clone()))
            .collect()
    }

    /// Check that this is a perfect matching over `participants`
    ///
    /// Returns a description of the first violated property.
    pub fn validate(&self, participants: &[Participant]) -> Result<(), String> {
        if self.len() != participants.len() {
            return Err(format!(
                "matching has {} entries for {} participants",
                self.len(),
                participants.len()
            ));
        }

        for p in participants {
            let q = self
                .partner(p)
                .ok_or_else(|| format!("{p:?} is unassigned"))?;
            if q == p {
                return Err(format!("{p:?} is paired with itself"));
            }
            if self.partner(q) != Some(p) {
                return Err(format!("pairing {p:?} -> {q:?} is not symmetric"));
            }
        }

        Ok(())
    }
}

/// Directed entries, each pair visited once per direction
impl<'a> IntoIterator for &'a Matching {
    type Item = (&'a Participant, &'a Participant);
    type IntoIter = std::collections::btree_map::Iter<'a, Participant, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.partners.iter()
    }
}

/// Odd roster handling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddPolicy {
    /// Fail with an odd-count error
    #[default]
    Reject,
    /// Add the [`BLANK`] placeholder; whoever draws it sits the round out
    Pad,
}

/// Append [`BLANK`] when the roster has odd length
pub fn pad_to_even(participants: &[Participant]) -> Vec<Participant> {
    let mut padded = participants.to_vec();
    if padded.len() % 2 != 0 {
        padded.push(BLANK.to_string());
    }
    padded
}
