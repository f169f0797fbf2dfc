//! Schedule text parsing
//!
//! The LLM returns a multi-week schedule as loosely structured text: week
//! headers, per-day bullet lines, and periodic checkpoint test sections.
//! This module turns that text into records ready for bulk storage. Parsing
//! is deliberately lenient - the input is generated free text, not a
//! verified grammar, so unrecognized lines are dropped rather than rejected.

mod checkpoints;
mod parser;

pub use checkpoints::{parse_checkpoints, ParsedCheckpoint};
pub use parser::{parse_schedule, ActivityType, ParsedActivity, DEFAULT_DURATION_MINUTES};
