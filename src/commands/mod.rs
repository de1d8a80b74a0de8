// Command handlers
pub mod pairing;

pub use pairing::{
    render_matching, render_schedule, run_match, run_schedule, MatchOptions, OutputFormat,
    ScheduleOptions,
};
