//! Validation report assembly.
//!
//! - [`build_report`]: combine sheet results and completeness scores
//! - [`write_report_json`]: persist a report as pretty-printed JSON

mod builder;
mod json;

pub use builder::{build_report, build_report_at, overall_status};
pub use json::{report_to_json, write_report_json};
