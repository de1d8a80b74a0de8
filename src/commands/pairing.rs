use crate::core::{record_matching, round_robin_schedule, Matcher, PairingError};
use crate::models::{
    pad_to_even, History, MatchingReport, OddPolicy, Pair, ScheduleReport, ScheduleRound, BLANK,
};
use crate::services::{load_roster, HistoryStore};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolved inputs for a matching round
#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub roster: PathBuf,
    pub history: PathBuf,
    /// Defaults to `history`
    pub output: Option<PathBuf>,
    pub odd_policy: OddPolicy,
    pub dry_run: bool,
}

/// Resolved inputs for a round-robin schedule
#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    pub roster: PathBuf,
    pub odd_policy: OddPolicy,
}

/// Pair the roster avoiding past pairings, then persist the history
///
/// A missing solution is reported rather than treated as an error; the
/// history is still written back. Failing to save is logged and reflected
/// in the report without discarding the matching.
pub fn run_match(options: &MatchOptions, now: DateTime<Utc>) -> Result<MatchingReport> {
    let participants = load_roster(&options.roster)?;
    let store = HistoryStore::new(&options.history);
    let mut history: History = store.load().context("cannot proceed without pairing history")?;

    tracing::info!(
        "Matching {} participants against history of {}",
        participants.len(),
        history.len()
    );

    let matcher = Matcher::new(options.odd_policy);
    let (solved, pairs) = match matcher.find_matching(&participants, &history) {
        Ok(matching) => {
            record_matching(&mut history, &matching, now);
            (true, matching.pairs())
        }
        Err(PairingError::NoSolution) => {
            tracing::warn!("Unable to solve: every remaining pairing repeats history");
            (false, Vec::new())
        }
        Err(e) => return Err(e.into()),
    };

    let history_saved = if options.dry_run {
        tracing::info!("Dry run, history not written");
        false
    } else {
        let target = HistoryStore::new(options.output.as_ref().unwrap_or(&options.history));
        match target.save(&history) {
            Ok(()) => {
                tracing::info!("History written to {}", target.path().display());
                true
            }
            Err(e) => {
                tracing::error!("Failed to save history: {}", e);
                false
            }
        }
    };

    Ok(MatchingReport {
        solved,
        pairs: pairs.into_iter().map(Pair::from).collect(),
        participants: participants.len(),
        history_saved,
        timestamp: now,
    })
}

/// Build the full round-robin schedule for the roster
pub fn run_schedule(options: &ScheduleOptions) -> Result<ScheduleReport> {
    let participants = load_roster(&options.roster)?;
    let roster = match options.odd_policy {
        OddPolicy::Reject => participants.clone(),
        OddPolicy::Pad => pad_to_even(&participants),
    };

    let rounds = round_robin_schedule(&roster)?
        .into_iter()
        .enumerate()
        .map(|(idx, matching)| ScheduleRound {
            round: idx + 1,
            pairs: matching.pairs().into_iter().map(Pair::from).collect(),
        })
        .collect();

    Ok(ScheduleReport {
        rounds,
        participants: participants.len(),
    })
}

fn render_pair(pair: &Pair) -> String {
    if pair.first == BLANK {
        format!("{} sits out", pair.second)
    } else if pair.second == BLANK {
        format!("{} sits out", pair.first)
    } else {
        format!("{} <-> {}", pair.first, pair.second)
    }
}

pub fn render_matching(report: &MatchingReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    if !report.solved {
        return Ok("Unable to solve".to_string());
    }
    Ok(report
        .pairs
        .iter()
        .map(render_pair)
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn render_schedule(report: &ScheduleReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut lines = Vec::new();
    for round in &report.rounds {
        lines.push(format!("Round {}", round.round));
        lines.extend(round.pairs.iter().map(|p| format!("  {}", render_pair(p))));
    }
    Ok(lines.join("\n"))
}
