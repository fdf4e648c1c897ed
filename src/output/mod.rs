//! Rendering of experiment results.
//!
//! The engine and driver return structured records; this module turns them
//! into a terminal transcript or JSON.

pub mod json;
pub mod terminal;

pub use json::{log_to_json, to_json, to_json_pretty};
pub use terminal::{format_report, Transcript};
