//! Ingest configuration.
//!
//! Stored as JSON. Every key is optional; missing keys take the defaults.

use crate::error::{Error, Result};
use crate::types::{ParsedReport, ReportHeader};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for parsing report exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngestConfig {
    /// Reports dated after this day are parsed with the newer layout.
    pub cutoff_date: NaiveDate,

    /// First field of the legacy project info row.
    pub marker_token: String,

    /// Display text for fields the export did not provide.
    pub placeholder: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            cutoff_date: crate::default_cutoff(),
            marker_token: crate::legacy_format::DEFAULT_MARKER.to_string(),
            placeholder: "Nicht verfügbar".to_string(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Err(Error::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: IngestConfig = serde_json::from_str(&content)?;
        if config.marker_token.trim().is_empty() {
            return Err(Error::Config("markerToken must not be empty".into()));
        }

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Override the cutoff date from a `YYYY-MM-DD` string.
    pub fn with_cutoff(mut self, cutoff: &str) -> Result<Self> {
        self.cutoff_date = NaiveDate::parse_from_str(cutoff.trim(), "%Y-%m-%d")
            .map_err(|_| Error::InvalidDate(cutoff.to_string()))?;
        Ok(self)
    }

    /// `value`, or the placeholder when it is absent.
    pub fn display<'a>(&'a self, value: Option<&'a str>) -> &'a str {
        value.unwrap_or(self.placeholder.as_str())
    }

    /// Project-level fields of `report` with gaps filled by the placeholder.
    pub fn header(&self, report: &ParsedReport) -> ReportHeader {
        let show = |value: &Option<String>| self.display(value.as_deref()).to_string();
        ReportHeader {
            project_number: show(&report.project_number),
            report_number: show(&report.report_number),
            report_date: show(&report.report_date),
            employee_name: show(&report.employee_name),
            employee_id: show(&report.employee_id),
            work_location: show(&report.work_location),
            trade: show(&report.trade),
            concern_id: show(&report.concern_id),
            customer: show(&report.customer),
        }
    }
}
