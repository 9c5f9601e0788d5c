//! Common types shared by both export layouts.

use crate::Format;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A report export after parsing, in either layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReport {
    /// Layout the blob was parsed with.
    pub format: Format,

    /// Project number.
    pub project_number: Option<String>,

    /// Report number as issued by the data-entry tool.
    pub report_number: Option<String>,

    /// Report date, verbatim from the export.
    pub report_date: Option<String>,

    /// Employee display name.
    pub employee_name: Option<String>,

    /// Employee number.
    pub employee_id: Option<String>,

    /// Work location on site.
    pub work_location: Option<String>,

    /// Trade (Gewerk), e.g. "Starkstromanlagen".
    pub trade: Option<String>,

    /// Concern (tenant) identifier. Only the legacy layout carries it.
    pub concern_id: Option<String>,

    /// Best-effort customer. The newer layout uses the project name.
    pub customer: Option<String>,

    /// Accepted work lines in blob order.
    pub work_lines: Vec<WorkLine>,

    /// What happened to every candidate row.
    pub diagnostics: ParseDiagnostics,
}

impl ParsedReport {
    /// Create an empty parse result for the given layout.
    pub fn new(format: Format) -> Self {
        Self {
            format,
            project_number: None,
            report_number: None,
            report_date: None,
            employee_name: None,
            employee_id: None,
            work_location: None,
            trade: None,
            concern_id: None,
            customer: None,
            work_lines: Vec::new(),
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Sum of the hours of all accepted work lines.
    pub fn total_hours(&self) -> Decimal {
        self.work_lines.iter().map(|line| line.hours).sum()
    }

    /// Record an accepted work line.
    pub(crate) fn accept(&mut self, line: WorkLine) {
        self.diagnostics.rows_seen += 1;
        self.diagnostics.rows_accepted += 1;
        self.work_lines.push(line);
    }

    /// Record a dropped row.
    pub(crate) fn drop_row(&mut self, line: usize, reason: DropReason) {
        log::debug!("{}: dropping line {}: {}", self.format.label(), line, reason);
        self.diagnostics.rows_seen += 1;
        self.diagnostics.dropped.push(RowDiagnostic { line, reason });
    }
}

/// Project-level fields of a parse, ready for display.
///
/// Fields the export did not provide hold the configured placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub project_number: String,
    pub report_number: String,
    pub report_date: String,
    pub employee_name: String,
    pub employee_id: String,
    pub work_location: String,
    pub trade: String,
    pub concern_id: String,
    pub customer: String,
}

/// One line of work within a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLine {
    /// Position within the report, 1-based.
    pub line_number: u32,

    /// Installed or serviced component, after cleanup.
    pub component: String,

    /// Work performed.
    pub work_done: String,

    /// Quantity, verbatim.
    pub quantity: String,

    /// Hours spent, 0 when the export value is not a number.
    pub hours: Decimal,

    /// Columns that only one of the layouts carries.
    pub detail: WorkLineDetail,
}

/// Layout-specific columns of a work line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "camelCase")]
pub enum WorkLineDetail {
    #[serde(rename_all = "camelCase")]
    Legacy {
        report_id: String,
        date_created: String,
        text: String,
        /// "zusatz" column.
        addition: String,
        active_project: String,
        location: String,
    },
    /// The newer layout repeats the report context on every line.
    #[serde(rename_all = "camelCase")]
    Newer {
        project_number: String,
        work_location: String,
        work_date: String,
        report_number: String,
        employee_id: String,
        employee_name: String,
        project_name: String,
        trade: String,
    },
}

/// Row-level accounting for a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostics {
    /// Candidate work-line rows looked at.
    pub rows_seen: usize,

    /// Rows that became work lines.
    pub rows_accepted: usize,

    /// Rows that did not, with the reason.
    pub dropped: Vec<RowDiagnostic>,
}

impl ParseDiagnostics {
    /// Whether every candidate row was accepted.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// A candidate row that was not turned into a work line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDiagnostic {
    /// 0-based line index within the blob.
    pub line: usize,

    /// Why the row was dropped.
    pub reason: DropReason,
}

/// Reason a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DropReason {
    /// Fewer comma-separated fields than the layout needs.
    TooFewFields { found: usize, required: usize },
    /// Component column empty after cleanup.
    EmptyComponent,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::TooFewFields { found, required } => {
                write!(f, "{} fields, {} required", found, required)
            }
            DropReason::EmptyComponent => write!(f, "empty component"),
        }
    }
}

/// Approval state of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A report as stored by the surrounding application.
///
/// Only the fields the parse output can backfill are modelled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub id: String,
    pub report_number: String,
    pub employee: String,
    pub customer: String,
    pub project_number: String,
    pub work_location: String,
    pub work_date: String,
    pub report_date: String,
    #[serde(rename = "mitarbeiterID")]
    pub employee_id: String,
    #[serde(rename = "concernID")]
    pub concern_id: String,
    pub total_hours: Option<Decimal>,
    pub status: ReportStatus,
    /// Raw export produced by the mobile data-entry tool.
    pub report_data: String,
    pub work_lines: Vec<WorkLine>,
}
