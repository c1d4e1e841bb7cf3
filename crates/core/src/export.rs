//! Winner list export
//!
//! Writes the ledger as an `.xlsx` workbook, falling back to CSV when the
//! workbook cannot be produced.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::EventInfo;

/// Column headings of every export
pub const COLUMNS: [&str; 3] = ["Name", "Department", "Attended"];

const SHEET_NAME: &str = "Winners";
const COLUMN_WIDTHS: [f64; 3] = [30.0, 25.0, 15.0];
const BANNER_COLOR: u32 = 0x1F4E9B;
const HEADER_COLOR: u32 = 0x7F93A0;

/// Rows ready to be written, independent of the file format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerTable {
    banner: Option<[String; 3]>,
    rows: Vec<[String; 3]>,
}

impl WinnerTable {
    pub fn from_ledger(ledger: &Ledger, event: Option<&EventInfo>) -> Self {
        let banner = event.map(|e| {
            [
                format!("Event: {}", e.name),
                format!("Date: {}", e.display_date()),
                String::new(),
            ]
        });

        let mut rows = Vec::with_capacity(ledger.len() + 1);
        rows.push(COLUMNS.map(String::from));
        rows.extend(ledger.records().iter().map(|r| {
            [
                r.name.clone(),
                r.department.clone(),
                if r.attended { "Yes" } else { "No" }.to_string(),
            ]
        }));

        Self { banner, rows }
    }

    /// Event/date line printed above the table
    pub fn banner(&self) -> Option<&[String; 3]> {
        self.banner.as_ref()
    }

    /// Header row followed by one row per winner
    pub fn rows(&self) -> &[[String; 3]] {
        &self.rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Spreadsheet,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// `winners_<YYYY-MM-DD_HH-MM-SS>.<ext>`
pub fn export_file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "winners_{}.{}",
        at.format("%Y-%m-%d_%H-%M-%S"),
        format.extension()
    )
}

/// Where the export ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Spreadsheet(PathBuf),
    /// The workbook failed with `reason`; a CSV was written instead
    CsvFallback { path: PathBuf, reason: String },
}

impl ExportOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ExportOutcome::Spreadsheet(path) => path.as_path(),
            ExportOutcome::CsvFallback { path, .. } => path.as_path(),
        }
    }
}

/// Build the `.xlsx` workbook in memory
pub fn render_spreadsheet(table: &WinnerTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    let banner_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(BANNER_COLOR))
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let mut row: u32 = 0;

    if let Some(banner) = table.banner() {
        sheet.write_string_with_format(row, 0, banner[0].as_str(), &banner_format)?;
        sheet.merge_range(row, 1, row, 2, banner[1].as_str(), &banner_format)?;
        sheet.set_row_height(row, 22)?;
        row += 1;
    }

    let mut rows = table.rows().iter();
    if let Some(header) = rows.next() {
        for (col, cell) in header.iter().enumerate() {
            sheet.write_string_with_format(row, col as u16, cell.as_str(), &header_format)?;
        }
        sheet.set_row_height(row, 20)?;
        row += 1;
    }

    for cells in rows {
        for (col, cell) in cells.iter().enumerate() {
            sheet.write_string(row, col as u16, cell.as_str())?;
        }
        row += 1;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Build the CSV fallback: UTF-8 BOM, every cell quoted, CRLF rows
pub fn render_csv(table: &WinnerTable) -> Result<Vec<u8>> {
    let mut buffer = "\u{feff}".as_bytes().to_vec();
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(&mut buffer);

        if let Some(banner) = table.banner() {
            writer.write_record(banner)?;
        }
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

/// Writes export files into one directory
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Export the ledger, preferring the spreadsheet format
    pub fn export(&self, ledger: &Ledger, event: Option<&EventInfo>) -> Result<ExportOutcome> {
        self.export_with(ledger, event, render_spreadsheet)
    }

    fn export_with<F>(
        &self,
        ledger: &Ledger,
        event: Option<&EventInfo>,
        spreadsheet: F,
    ) -> Result<ExportOutcome>
    where
        F: FnOnce(&WinnerTable) -> Result<Vec<u8>>,
    {
        if ledger.is_empty() {
            return Err(Error::NothingToExport);
        }

        let table = WinnerTable::from_ledger(ledger, event);
        let now = Utc::now();

        let attempt = spreadsheet(&table)
            .and_then(|bytes| self.write(ExportFormat::Spreadsheet, now, &bytes));

        match attempt {
            Ok(path) => {
                tracing::info!(path = %path.display(), winners = ledger.len(), "Spreadsheet exported");
                Ok(ExportOutcome::Spreadsheet(path))
            }
            Err(e) => {
                tracing::error!(error = %e, "Spreadsheet export failed, falling back to CSV");
                let bytes = render_csv(&table)?;
                let path = self.write(ExportFormat::Csv, now, &bytes)?;
                tracing::info!(path = %path.display(), winners = ledger.len(), "CSV exported");
                Ok(ExportOutcome::CsvFallback {
                    path,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn write(&self, format: ExportFormat, at: DateTime<Utc>, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(export_file_name(format, at));
        fs::write(&path, bytes)?;
        Ok(path)
    }
}
