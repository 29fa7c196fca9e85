//! Activities module - trade-export events and the parsers that produce them.

mod activities_errors;
mod activities_model;
mod activities_service;
mod csv_loader;
mod webull;

#[cfg(test)]
mod webull_tests;

pub use activities_errors::ActivityError;
pub use activities_model::Activity;
pub use activities_service::{import_order_activities, import_transfer_activities};
pub use csv_loader::{load_csv_batches, CsvBatch};
pub use webull::{WebullOrdersParser, WebullTransfersParser};
