//! Discovery and raw parsing of brokerage CSV export files.
//!
//! Export folders typically hold several generations of downloads
//! (`Webull_Orders_Records_*.csv`), so files are matched by `*`-wildcard
//! patterns and every match is loaded into one batch per file. Batches keep
//! rows as strings; interpreting columns is the parsers' job.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, warn};
use regex::Regex;

use super::ActivityError;

/// Raw contents of one matched CSV export file.
#[derive(Debug, Clone)]
pub struct CsvBatch {
    /// File name the batch was loaded from (no directory).
    pub source_file: String,
    /// Header row, as written by the broker.
    pub headers: Vec<String>,
    /// Data rows; cells are untrimmed strings.
    pub rows: Vec<Vec<String>>,
}

impl CsvBatch {
    /// Case-insensitive lookup of a column index by header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }
}

/// Load every CSV file under `folder` whose name matches one of `patterns`.
///
/// Patterns support `*` as a multi-character wildcard, nothing else. Files
/// are loaded in name order so repeated runs see identical batch order.
/// Matching zero files is an error; matching a file with no data rows is
/// not (the batch is skipped with a log line).
pub fn load_csv_batches(folder: &Path, patterns: &[String]) -> Result<Vec<CsvBatch>, ActivityError> {
    let regexes: Vec<Regex> = patterns
        .iter()
        .map(|p| compile_pattern(p))
        .collect::<Result<_, _>>()?;

    let mut names: Vec<String> = std::fs::read_dir(folder)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| regexes.iter().any(|re| re.is_match(name)))
        .collect();
    names.sort();

    let mut batches = Vec::with_capacity(names.len());
    for name in names {
        let batch = read_batch(&folder.join(&name), &name)?;
        if batch.rows.is_empty() {
            debug!("Skipping empty export file {}", name);
            continue;
        }
        batches.push(batch);
    }

    if batches.is_empty() {
        warn!(
            "No export rows found under {} for patterns {:?}",
            folder.display(),
            patterns
        );
        return Err(ActivityError::NoFilesMatched {
            folder: folder.display().to_string(),
            patterns: patterns.to_vec(),
        });
    }

    Ok(batches)
}

fn compile_pattern(pattern: &str) -> Result<Regex, ActivityError> {
    let escaped: Vec<String> = pattern.split('*').map(|s| regex::escape(s)).collect();
    let anchored = format!("^{}$", escaped.join(".*"));
    Regex::new(&anchored).map_err(|_| ActivityError::InvalidPattern(pattern.to_string()))
}

fn read_batch(path: &Path, name: &str) -> Result<CsvBatch, ActivityError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(CsvBatch {
        source_file: name.to_string(),
        headers,
        rows,
    })
}
