//! Exports of analyzed reviews: Excel, CSV, JSON and a plain-text summary

mod files;
mod report;

pub use files::{EXPORT_COLUMNS, ExportFormat, write_csv, write_json, write_summary, write_xlsx};
pub use report::summary_report;
