//! Newer export parser.
//!
//! Exports produced after the cutoff date start with a column header row:
//!
//! ```text
//! linenumber,component,workDone,quantity,hours,activeProject,location,dateCreated,UIDAB,mitarbeiterID,mitarbeiterName,activeprojectName,gewerk
//! ```
//!
//! The first data row after the header carries the project-level values and
//! is never a work line. Every following row is a work line.

use crate::cleanup::clean_component;
use crate::error::{Error, Result};
use crate::fields::{field, leading_decimal, leading_line_number, optional_field, split_row};
use crate::layout::{NEWER_HEADER_TOKENS, NEWER_LINE, NEWER_PROJECT};
use crate::types::{DropReason, ParsedReport, WorkLine, WorkLineDetail};
use crate::Format;
use std::io::Read;
use std::str::FromStr;

/// Represents a newer-layout export.
#[derive(Debug, Clone, PartialEq)]
pub struct NewerExport {
    /// The parsed report data.
    pub report: ParsedReport,
}

impl NewerExport {
    /// Parse a newer export from any source implementing `Read`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use report_ingest::newer_format::NewerExport;
    ///
    /// let mut file = File::open("report.csv")?;
    /// let export = NewerExport::from_read(&mut file)?;
    /// println!("{} work lines", export.report.work_lines.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut blob = String::new();
        reader.read_to_string(&mut blob)?;
        blob.parse()
    }

    fn parse_blob(blob: &str) -> Result<Self> {
        let lines: Vec<&str> = blob.lines().collect();

        let header_index = lines
            .iter()
            .position(|line| NEWER_HEADER_TOKENS.iter().all(|token| line.contains(token)))
            .ok_or(Error::MissingHeader)?;

        let mut data_rows = lines
            .iter()
            .enumerate()
            .skip(header_index + 1)
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, project_row) = data_rows.next().ok_or(Error::NoDataRows)?;

        let mut report = ParsedReport::new(Format::Newer);
        Self::read_project_info(&mut report, &split_row(project_row));

        for (position, (index, line)) in data_rows.enumerate() {
            let fields = split_row(line);

            if fields.len() < NEWER_LINE.min_fields {
                report.drop_row(
                    index,
                    DropReason::TooFewFields {
                        found: fields.len(),
                        required: NEWER_LINE.min_fields,
                    },
                );
                continue;
            }

            let context = |index: usize| field(&fields, index).to_string();

            report.accept(WorkLine {
                line_number: leading_line_number(field(&fields, NEWER_LINE.line_number))
                    .unwrap_or(position as u32 + 1),
                component: clean_component(field(&fields, NEWER_LINE.component)),
                work_done: context(NEWER_LINE.work_done),
                quantity: context(NEWER_LINE.quantity),
                hours: leading_decimal(field(&fields, NEWER_LINE.hours)),
                detail: WorkLineDetail::Newer {
                    project_number: context(NEWER_PROJECT.project_number),
                    work_location: context(NEWER_PROJECT.work_location),
                    work_date: context(NEWER_PROJECT.report_date),
                    report_number: context(NEWER_PROJECT.report_number),
                    employee_id: context(NEWER_PROJECT.employee_id),
                    employee_name: context(NEWER_PROJECT.employee_name),
                    project_name: NEWER_PROJECT.project_name.map(context).unwrap_or_default(),
                    trade: context(NEWER_PROJECT.trade),
                },
            });
        }

        Ok(NewerExport { report })
    }

    fn read_project_info(report: &mut ParsedReport, fields: &[&str]) {
        let columns = NEWER_PROJECT;
        report.project_number = optional_field(fields, columns.project_number);
        report.work_location = optional_field(fields, columns.work_location);
        report.report_date = optional_field(fields, columns.report_date);
        report.report_number = optional_field(fields, columns.report_number);
        report.employee_id = optional_field(fields, columns.employee_id);
        report.employee_name = optional_field(fields, columns.employee_name);
        report.trade = optional_field(fields, columns.trade);
        report.customer = columns
            .project_name
            .and_then(|index| optional_field(fields, index));
    }
}

impl FromStr for NewerExport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_blob(s)
    }
}
