//! Import orchestration: discover export files, parse them, log what landed.

use std::path::Path;

use log::info;

use crate::errors::Result;

use super::{load_csv_batches, Activity, WebullOrdersParser, WebullTransfersParser};

/// Load and parse order-record exports into trade activities.
///
/// Returns activities sorted by timestamp. Matching no files at all is an
/// error; matching files that parse to zero filled trades is not.
pub fn import_order_activities(folder: &Path, patterns: &[String]) -> Result<Vec<Activity>> {
    let batches = load_csv_batches(folder, patterns)?;
    let rows: usize = batches.iter().map(|b| b.rows.len()).sum();
    info!("Loaded {} rows from {} order export file(s)", rows, batches.len());

    let activities = WebullOrdersParser::parse(&batches)?;
    let symbols = activities
        .iter()
        .map(|a| a.symbol.as_str())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    info!(
        "Parsed {} filled trades across {} symbols",
        activities.len(),
        symbols
    );
    Ok(activities)
}

/// Load and parse transfer exports into external cash-flow activities.
pub fn import_transfer_activities(folder: &Path, patterns: &[String]) -> Result<Vec<Activity>> {
    let batches = load_csv_batches(folder, patterns)?;
    let activities = WebullTransfersParser::parse(&batches)?;
    info!(
        "Parsed {} completed transfers from {} export file(s)",
        activities.len(),
        batches.len()
    );
    Ok(activities)
}
