//! CSV export of parsed work lines.

use crate::error::Result;
use crate::types::ParsedReport;
use csv::Writer;
use serde::Serialize;
use std::io::Write;

/// One exported work line.
#[derive(Debug, Serialize)]
struct CsvWorkLine<'a> {
    #[serde(rename = "linenumber")]
    line_number: u32,
    component: &'a str,
    #[serde(rename = "workDone")]
    work_done: &'a str,
    quantity: &'a str,
    hours: String,
}

/// Write the work lines of `report` to any destination implementing `Write`.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use report_ingest::{csv_export::write_work_lines_csv, parse_report, IngestConfig};
///
/// let blob = std::fs::read_to_string("report.csv")?;
/// let report = parse_report(&blob, None, &IngestConfig::default())?;
/// let mut file = File::create("work_lines.csv")?;
/// write_work_lines_csv(&report, &mut file)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_work_lines_csv<W: Write>(report: &ParsedReport, writer: &mut W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);

    if report.work_lines.is_empty() {
        csv_writer.write_record(["linenumber", "component", "workDone", "quantity", "hours"])?;
    }

    for line in &report.work_lines {
        csv_writer.serialize(CsvWorkLine {
            line_number: line.line_number,
            component: &line.component,
            work_done: &line.work_done,
            quantity: &line.quantity,
            hours: line.hours.to_string(),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{WorkLine, WorkLineDetail};
    use crate::Format;
    use rust_decimal::Decimal;

    fn work_line(number: u32, component: &str, hours: Decimal) -> WorkLine {
        WorkLine {
            line_number: number,
            component: component.into(),
            work_done: "montiert".into(),
            quantity: "2".into(),
            hours,
            detail: WorkLineDetail::Legacy {
                report_id: String::new(),
                date_created: String::new(),
                text: String::new(),
                addition: String::new(),
                active_project: String::new(),
                location: String::new(),
            },
        }
    }

    #[test]
    fn test_write_work_lines() {
        let mut report = ParsedReport::new(Format::Legacy);
        report.work_lines.push(work_line(1, "Taster", Decimal::new(15, 1)));
        report.work_lines.push(work_line(2, "Kabelbahn: 300, verzinkt", Decimal::ONE));

        let mut out = Vec::new();
        write_work_lines_csv(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "linenumber,component,workDone,quantity,hours\n\
             1,Taster,montiert,2,1.5\n\
             2,\"Kabelbahn: 300, verzinkt\",montiert,2,1\n"
        );
    }

    #[test]
    fn test_empty_report_writes_header() {
        let report = ParsedReport::new(Format::Newer);
        let mut out = Vec::new();
        write_work_lines_csv(&report, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "linenumber,component,workDone,quantity,hours\n"
        );
    }
}
