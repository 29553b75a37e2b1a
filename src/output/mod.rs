//! Output module for harvest artifacts
//!
//! This module handles:
//! - The question record type and its JSONL serialisation
//! - Persisting and reloading the question URL list
//! - Recording run statistics

mod files;
mod record;
pub mod stats;

pub use files::{read_records, read_url_list, write_records, write_url_list};
pub use record::{QaRecord, NULL_PLACEHOLDER};
pub use stats::{log_statistics, print_statistics, HarvestStats};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialise record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
