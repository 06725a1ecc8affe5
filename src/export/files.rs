//! File exports of scored reviews

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analytics::{ScoredReview, SentimentLabel, SentimentStats};
use crate::errors::ScrapeResult;

/// Column headers for tabular exports: the seven record columns plus sentiment
pub const EXPORT_COLUMNS: [&str; 9] = [
    "Product Name",
    "Overall Rating",
    "Price",
    "Date",
    "Rating",
    "Reviewer",
    "Comment",
    "Sentiment Score",
    "Sentiment",
];

/// Flat row shared by the CSV and JSON writers
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Product Name")]
    product_name: &'a str,
    #[serde(rename = "Overall Rating")]
    overall_rating: &'a str,
    #[serde(rename = "Price")]
    price: &'a str,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Rating")]
    rating: &'a str,
    #[serde(rename = "Reviewer")]
    reviewer: &'a str,
    #[serde(rename = "Comment")]
    comment: &'a str,
    #[serde(rename = "Sentiment Score")]
    sentiment_score: f64,
    #[serde(rename = "Sentiment")]
    sentiment: &'static str,
}

impl<'a> From<&'a ScoredReview> for ExportRow<'a> {
    fn from(review: &'a ScoredReview) -> Self {
        let record = &review.record;
        Self {
            product_name: record.product_name(),
            overall_rating: record.overall_rating(),
            price: record.price(),
            date: record.date(),
            rating: record.rating(),
            reviewer: record.reviewer(),
            comment: record.comment(),
            sentiment_score: review.score,
            sentiment: review.label.as_str(),
        }
    }
}

/// Kinds of file the CLI can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
    Summary,
}

impl ExportFormat {
    /// `{prefix}_{YYYYmmdd_HHMMSS}.{ext}` for a run finished at `now`
    #[must_use]
    pub fn default_filename(self, now: DateTime<Local>) -> PathBuf {
        let ts = now.format("%Y%m%d_%H%M%S");
        let name = match self {
            Self::Xlsx => format!("reviews_{ts}.xlsx"),
            Self::Csv => format!("reviews_{ts}.csv"),
            Self::Json => format!("reviews_{ts}.json"),
            Self::Summary => format!("summary_report_{ts}.txt"),
        };
        PathBuf::from(name)
    }
}

/// Write scored reviews as CSV with a header row
pub fn write_csv(path: &Path, reviews: &[ScoredReview]) -> ScrapeResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if reviews.is_empty() {
        writer.write_record(EXPORT_COLUMNS)?;
    }
    for review in reviews {
        writer.serialize(ExportRow::from(review))?;
    }
    writer.flush()?;
    info!("CSV file exported: {}", path.display());
    Ok(())
}

/// Write scored reviews as a pretty-printed JSON array
pub fn write_json(path: &Path, reviews: &[ScoredReview]) -> ScrapeResult<()> {
    let rows: Vec<ExportRow<'_>> = reviews.iter().map(ExportRow::from).collect();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!("JSON file exported: {}", path.display());
    Ok(())
}

/// Widest a spreadsheet column is allowed to grow, in characters
const MAX_COLUMN_WIDTH: usize = 50;

/// Column widths fitted to the longest cell (header included) plus padding
fn fitted_widths(reviews: &[ScoredReview]) -> [usize; 9] {
    let mut widths = EXPORT_COLUMNS.map(|name| name.chars().count());
    for review in reviews {
        let row = ExportRow::from(review);
        let cells = [
            row.product_name.chars().count(),
            row.overall_rating.chars().count(),
            row.price.chars().count(),
            row.date.chars().count(),
            row.rating.chars().count(),
            row.reviewer.chars().count(),
            row.comment.chars().count(),
            row.sentiment_score.to_string().len(),
            row.sentiment.len(),
        ];
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell);
        }
    }
    widths.map(|w| (w + 2).min(MAX_COLUMN_WIDTH))
}

/// Write scored reviews as an Excel workbook.
///
/// The "Reviews" sheet holds one row per review under a highlighted header;
/// the "Statistics" sheet holds run-level totals.
pub fn write_xlsx(path: &Path, reviews: &[ScoredReview]) -> ScrapeResult<()> {
    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4361EE))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name("Reviews")?;
    for (col, name) in (0u16..).zip(EXPORT_COLUMNS) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }
    for (row, review) in (1u32..).zip(reviews) {
        let cells = ExportRow::from(review);
        let text = [
            cells.product_name,
            cells.overall_rating,
            cells.price,
            cells.date,
            cells.rating,
            cells.reviewer,
            cells.comment,
        ];
        for (col, value) in (0u16..).zip(text) {
            sheet.write_string(row, col, value)?;
        }
        sheet.write_number(row, 7, cells.sentiment_score)?;
        sheet.write_string(row, 8, cells.sentiment)?;
    }
    for (col, width) in (0u16..).zip(fitted_widths(reviews)) {
        sheet.set_column_width(col, width as f64)?;
    }

    let stats = SentimentStats::from_scored(reviews);
    let average_rating = stats
        .average_rating
        .map_or_else(|| "N/A".to_string(), |avg| format!("{avg:.2}"));
    let metrics = [
        ("Total Reviews", stats.total.to_string()),
        ("Unique Products", stats.unique_products.to_string()),
        ("Average Rating", average_rating),
        ("Positive Reviews", stats.count(SentimentLabel::Positive).to_string()),
        ("Negative Reviews", stats.count(SentimentLabel::Negative).to_string()),
        ("Neutral Reviews", stats.count(SentimentLabel::Neutral).to_string()),
    ];

    let sheet = workbook.add_worksheet().set_name("Statistics")?;
    sheet.write_string_with_format(0, 0, "Metric", &header)?;
    sheet.write_string_with_format(0, 1, "Value", &header)?;
    for (row, (metric, value)) in (1u32..).zip(metrics) {
        sheet.write_string(row, 0, metric)?;
        sheet.write_string(row, 1, value.as_str())?;
    }
    sheet.set_column_width(0, 20.0)?;
    sheet.set_column_width(1, 12.0)?;

    workbook.save(path)?;
    info!("Excel file exported: {}", path.display());
    Ok(())
}

/// Write an already rendered summary report
pub fn write_summary(path: &Path, report: &str) -> ScrapeResult<()> {
    std::fs::write(path, report)?;
    info!("Summary report exported: {}", path.display());
    Ok(())
}
