//! Run statistics
//!
//! Failed pages and missing fields never abort a run, so these counters are
//! the only summary of how complete the output is.

use crate::crawler::QaField;
use crate::output::record::QaRecord;
use std::collections::HashMap;

/// Counters collected over one harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestStats {
    /// Listing pages fetched successfully
    pub listing_pages_fetched: u64,

    /// Listing pages abandoned after retries
    pub listing_pages_failed: u64,

    /// Links seen across all listing pages, duplicates included
    pub links_found: u64,

    /// Distinct question URLs handed to the detail phase
    pub unique_urls: u64,

    /// Question pages fetched successfully
    pub detail_pages_fetched: u64,

    /// Question pages abandoned after retries
    pub detail_pages_failed: u64,

    /// Records written to the output file
    pub records_written: u64,

    /// Missing-field counts, keyed by field
    pub missing_fields: HashMap<QaField, u64>,
}

impl HarvestStats {
    /// Counts the empty fields of a freshly extracted record
    pub fn record_missing_fields(&mut self, record: &QaRecord) {
        let fields = [
            (QaField::Title, &record.title),
            (QaField::Question, &record.question),
            (QaField::Replier, &record.replier),
            (QaField::Answer, &record.answer),
        ];

        for (field, value) in fields {
            if value.is_none() {
                *self.missing_fields.entry(field).or_insert(0) += 1;
            }
        }
    }

    pub fn missing(&self, field: QaField) -> u64 {
        self.missing_fields.get(&field).copied().unwrap_or(0)
    }

    /// Share of question pages that produced a record
    pub fn success_rate(&self) -> f64 {
        let attempted = self.detail_pages_fetched + self.detail_pages_failed;
        if attempted == 0 {
            return 0.0;
        }
        self.detail_pages_fetched as f64 / attempted as f64 * 100.0
    }

    /// Builds statistics from an existing record file
    pub fn from_records(records: &[QaRecord]) -> Self {
        let mut stats = Self {
            unique_urls: records.len() as u64,
            detail_pages_fetched: records.len() as u64,
            records_written: records.len() as u64,
            ..Self::default()
        };

        for record in records {
            stats.record_missing_fields(record);
        }

        stats
    }
}

/// Logs the statistics at info level
pub fn log_statistics(stats: &HarvestStats) {
    tracing::info!(
        "Listing pages: {} fetched, {} failed ({} links, {} unique)",
        stats.listing_pages_fetched,
        stats.listing_pages_failed,
        stats.links_found,
        stats.unique_urls
    );
    tracing::info!(
        "Question pages: {} fetched, {} failed ({:.2}% success)",
        stats.detail_pages_fetched,
        stats.detail_pages_failed,
        stats.success_rate()
    );
    for field in QaField::ALL {
        let missing = stats.missing(field);
        if missing > 0 {
            tracing::info!("Records missing {}: {}", field, missing);
        }
    }
    tracing::info!("Scraped {} QA pages", stats.records_written);
}

/// Prints the statistics to stdout
pub fn print_statistics(stats: &HarvestStats) {
    println!("=== QA-Harvest Statistics ===\n");

    println!("Records: {}", stats.records_written);
    println!("\nMissing fields:");
    for field in QaField::ALL {
        let missing = stats.missing(field);
        let share = if stats.records_written == 0 {
            0.0
        } else {
            missing as f64 / stats.records_written as f64 * 100.0
        };
        println!("  {:<10} {:>8} ({:.2}%)", field.as_str(), missing, share);
    }
}
