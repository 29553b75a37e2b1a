//! On-disk artifacts of a harvest run
//!
//! - the question URL list: plain text, one link per line
//! - the record file: one JSON object per line, non-ASCII kept as-is

use crate::output::record::QaRecord;
use crate::output::OutputResult;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Writes the URL list, newline-joined with no trailing newline
pub fn write_url_list(path: &Path, urls: &[String]) -> OutputResult<()> {
    fs::write(path, urls.join("\n"))?;
    Ok(())
}

/// Reads a URL list back, ignoring blank lines
pub fn read_url_list(path: &Path) -> OutputResult<Vec<String>> {
    let content = fs::read_to_string(path)?;

    Ok(content
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Writes every record as one JSON line
///
/// The file is created (or truncated) here; nothing is written before the
/// run has finished.
pub fn write_records(path: &Path, records: &[QaRecord]) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a JSONL record file
pub fn read_records(path: &Path) -> OutputResult<Vec<QaRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }

    Ok(records)
}
