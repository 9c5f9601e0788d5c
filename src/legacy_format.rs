//! Legacy export parser.
//!
//! Exports produced before the cutoff date carry their project-level data in a
//! single marker row (first field `ProjectInfo`). Every other non-blank row,
//! apart from the column header, is a work line of at least 11 fields:
//!
//! ```text
//! linenumber,reportID,component,workDone,quantity,hours,dateCreated,text,zusatz,activeProject,location
//! ```

use crate::cleanup::clean_component;
use crate::error::{Error, Result};
use crate::fields::{field, leading_decimal, leading_line_number, optional_field, split_row};
use crate::layout::{
    LEGACY_HEADER_FIRST_FIELD, LEGACY_LINE, LEGACY_LINE_ACTIVE_PROJECT, LEGACY_LINE_ADDITION,
    LEGACY_LINE_DATE_CREATED, LEGACY_LINE_LOCATION, LEGACY_LINE_REPORT_ID, LEGACY_LINE_TEXT,
    LEGACY_PROJECT,
};
use crate::types::{DropReason, ParsedReport, WorkLine, WorkLineDetail};
use crate::Format;
use std::io::Read;
use std::str::FromStr;

/// Marker token of the project info row.
pub const DEFAULT_MARKER: &str = "ProjectInfo";

/// Represents a legacy-layout export.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyExport {
    /// The parsed report data.
    pub report: ParsedReport,
}

impl LegacyExport {
    /// Parse a legacy export from any source implementing `Read`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use report_ingest::legacy_format::LegacyExport;
    ///
    /// let mut file = File::open("report.csv")?;
    /// let export = LegacyExport::from_read(&mut file)?;
    /// println!("Total hours: {}", export.report.total_hours());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut blob = String::new();
        reader.read_to_string(&mut blob)?;
        Self::parse(&blob, DEFAULT_MARKER)
    }

    /// Parse a legacy export, locating the project row by `marker`.
    ///
    /// Fails only when no marker row exists. Malformed work lines are
    /// recorded in the report's diagnostics and left out.
    pub fn parse(blob: &str, marker: &str) -> Result<Self> {
        let lines: Vec<&str> = blob.lines().collect();

        let marker_line = lines
            .iter()
            .find(|line| Self::first_field(line) == marker)
            .ok_or_else(|| Error::MissingMarker(marker.to_string()))?;

        let mut report = ParsedReport::new(Format::Legacy);
        Self::read_project_info(&mut report, &split_row(marker_line));

        let candidates = lines.iter().enumerate().filter(|(_, line)| {
            let first = Self::first_field(line);
            !line.trim().is_empty() && first != marker && first != LEGACY_HEADER_FIRST_FIELD
        });

        for (position, (index, line)) in candidates.enumerate() {
            let fields = split_row(line);

            if fields.len() < LEGACY_LINE.min_fields {
                report.drop_row(
                    index,
                    DropReason::TooFewFields {
                        found: fields.len(),
                        required: LEGACY_LINE.min_fields,
                    },
                );
                continue;
            }

            let component = clean_component(field(&fields, LEGACY_LINE.component));
            if component.is_empty() {
                report.drop_row(index, DropReason::EmptyComponent);
                continue;
            }

            report.accept(WorkLine {
                line_number: leading_line_number(field(&fields, LEGACY_LINE.line_number))
                    .unwrap_or(position as u32 + 1),
                component,
                work_done: field(&fields, LEGACY_LINE.work_done).to_string(),
                quantity: field(&fields, LEGACY_LINE.quantity).to_string(),
                hours: leading_decimal(field(&fields, LEGACY_LINE.hours)),
                detail: WorkLineDetail::Legacy {
                    report_id: field(&fields, LEGACY_LINE_REPORT_ID).to_string(),
                    date_created: field(&fields, LEGACY_LINE_DATE_CREATED).to_string(),
                    text: field(&fields, LEGACY_LINE_TEXT).to_string(),
                    addition: field(&fields, LEGACY_LINE_ADDITION).to_string(),
                    active_project: field(&fields, LEGACY_LINE_ACTIVE_PROJECT).to_string(),
                    location: field(&fields, LEGACY_LINE_LOCATION).to_string(),
                },
            });
        }

        Ok(LegacyExport { report })
    }

    fn first_field(line: &str) -> &str {
        line.split(',').next().unwrap_or("").trim()
    }

    fn read_project_info(report: &mut ParsedReport, fields: &[&str]) {
        let columns = LEGACY_PROJECT;
        report.project_number = optional_field(fields, columns.project_number);
        report.report_number = optional_field(fields, columns.report_number);
        report.report_date = optional_field(fields, columns.report_date);
        report.employee_name = optional_field(fields, columns.employee_name);
        report.employee_id = optional_field(fields, columns.employee_id);
        report.work_location = optional_field(fields, columns.work_location);
        report.trade = optional_field(fields, columns.trade);
        report.concern_id = columns
            .concern_id
            .and_then(|index| optional_field(fields, index));
    }
}

impl FromStr for LegacyExport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, DEFAULT_MARKER)
    }
}
