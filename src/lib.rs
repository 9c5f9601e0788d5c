//! Report Ingest Library
//!
//! A library for reading the field-report exports of the mobile data-entry
//! tool and for reconciling employee snapshots.
//!
//! # Supported Formats
//!
//! - **Legacy**: exports up to the cutoff date, project data in a `ProjectInfo` row
//! - **Newer**: exports after the cutoff date, project data in the first row after the header
//!
//! # Features
//!
//! - Pick the export layout from a report's date
//! - Parse either layout into one [`ParsedReport`] with row diagnostics
//! - Backfill a stored [`Report`] from its parsed export
//! - Diff a local employee snapshot against the remote store
//! - Export work lines to CSV
//!
//! # Examples
//!
//! ## Parsing a report export
//!
//! ```no_run
//! use report_ingest::{parse_report, IngestConfig};
//!
//! let blob = std::fs::read_to_string("report.csv")?;
//! let report = parse_report(&blob, Some("2025-09-02"), &IngestConfig::default())?;
//! println!("{} hours", report.total_hours());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reconciling employees
//!
//! ```
//! use report_ingest::reconcile::{reconcile, Employee};
//!
//! let local = vec![Employee::new("1", "a@x.com")];
//! let remote = vec![Employee::new("1", "b@x.com")];
//!
//! let changes = reconcile(&local, &remote);
//! assert_eq!(changes.updated.len(), 1);
//! ```

pub mod error;
pub mod types;
pub mod fields;
pub mod cleanup;
pub mod layout;
pub mod legacy_format;
pub mod newer_format;
pub mod backfill;
pub mod reconcile;
pub mod csv_export;
pub mod config;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use config::IngestConfig;
pub use error::{Error, Result};
pub use types::{
    ParseDiagnostics, ParsedReport, Report, ReportHeader, ReportStatus, WorkLine, WorkLineDetail,
};

use legacy_format::LegacyExport;
use newer_format::NewerExport;

/// Exports dated after this day use the newer layout.
pub fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 15).unwrap_or_default()
}

/// Report export layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Marker-row layout used up to the cutoff date
    Legacy,
    /// Header-row layout used after the cutoff date
    Newer,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "legacy" | "old" => Ok(Format::Legacy),
            "newer" | "new" => Ok(Format::Newer),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl Format {
    /// Pick the layout for a report recorded on `report_date`.
    ///
    /// Absent or unreadable dates fall back to [`Format::Legacy`]. Only a
    /// moment strictly after midnight of `cutoff` selects [`Format::Newer`].
    pub fn detect(report_date: Option<&str>, cutoff: NaiveDate) -> Format {
        let cutoff = cutoff.and_time(NaiveTime::MIN);
        let format = match report_date.and_then(parse_report_date) {
            Some(moment) if moment > cutoff => Format::Newer,
            _ => Format::Legacy,
        };
        log::debug!("report date {:?} -> {} layout", report_date, format.label());
        format
    }

    /// Provenance tag attached to parse results.
    pub fn label(&self) -> &'static str {
        match self {
            Format::Legacy => "legacy",
            Format::Newer => "newer",
        }
    }

    /// Parse `blob` in this layout.
    pub fn parse(&self, blob: &str, config: &IngestConfig) -> Result<ParsedReport> {
        match self {
            Format::Legacy => {
                let export = LegacyExport::parse(blob, &config.marker_token)?;
                Ok(export.report)
            }
            Format::Newer => {
                let export = blob.parse::<NewerExport>()?;
                Ok(export.report)
            }
        }
    }
}

/// Read a report date the way the reporting screens always have.
///
/// Date-only values are taken as midnight, timestamps with an offset are
/// compared in UTC.
pub fn parse_report_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(moment) = DateTime::parse_from_rfc3339(value) {
        return Some(moment.with_timezone(&Utc).naive_utc());
    }

    let datetime_formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
    for format in datetime_formats {
        if let Ok(moment) = NaiveDateTime::parse_from_str(value, format) {
            return Some(moment);
        }
    }

    let date_formats = [
        "%Y-%m-%d", // 2025-08-15
        "%m/%d/%Y", // 08/15/2025
        "%m.%d.%Y", // 08.15.2025, month first like the slash form
    ];
    for format in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Detect the layout from `report_date` and parse `blob` with it.
pub fn parse_report(
    blob: &str,
    report_date: Option<&str>,
    config: &IngestConfig,
) -> Result<ParsedReport> {
    Format::detect(report_date, config.cutoff_date).parse(blob, config)
}

/// Like [`parse_report`], but structural failures become `None`.
///
/// `None` means nothing could be extracted and the raw text should be shown
/// instead. Blank blobs are `None` without an attempt.
pub fn parse_report_opt(
    blob: &str,
    report_date: Option<&str>,
    config: &IngestConfig,
) -> Option<ParsedReport> {
    if blob.trim().is_empty() {
        return None;
    }
    match parse_report(blob, report_date, config) {
        Ok(report) => Some(report),
        Err(err) => {
            log::warn!("no report data extracted: {}", err);
            None
        }
    }
}
