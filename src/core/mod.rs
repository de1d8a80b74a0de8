// Core algorithm exports
pub mod error;
pub mod history;
pub mod matcher;
pub mod round_robin;

pub use error::PairingError;
pub use history::{has_paired, last_paired, record_matching};
pub use matcher::Matcher;
pub use round_robin::round_robin_schedule;
