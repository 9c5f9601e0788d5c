//! Filling a stored report from its parsed export.
//!
//! A stored [`Report`] keeps its own fields authoritative. The export only
//! fills what is missing, and an approved report is left alone entirely.

use crate::config::IngestConfig;
use crate::types::{ParsedReport, Report, ReportStatus};

impl Report {
    /// Parse this report's raw export, choosing the layout by its date.
    ///
    /// `None` when the export is blank or has no recognizable structure.
    pub fn parse_blob(&self, config: &IngestConfig) -> Option<ParsedReport> {
        let report_date = Some(self.report_date.as_str()).filter(|date| !date.trim().is_empty());
        crate::parse_report_opt(&self.report_data, report_date, config)
    }

    /// Fill absent fields from `parsed`. Returns whether anything changed.
    pub fn backfill(&mut self, parsed: &ParsedReport) -> bool {
        if self.status == ReportStatus::Approved {
            return false;
        }

        let mut changed = false;
        changed |= fill(&mut self.report_number, &parsed.report_number);
        changed |= fill(&mut self.employee, &parsed.employee_name);
        changed |= fill(&mut self.customer, &parsed.customer);
        changed |= fill(&mut self.project_number, &parsed.project_number);
        changed |= fill(&mut self.work_location, &parsed.work_location);
        changed |= fill(&mut self.work_date, &parsed.report_date);
        changed |= fill(&mut self.report_date, &parsed.report_date);
        changed |= fill(&mut self.employee_id, &parsed.employee_id);
        changed |= fill(&mut self.concern_id, &parsed.concern_id);

        if self.total_hours.is_none() {
            self.total_hours = Some(parsed.total_hours());
            changed = true;
        }

        if self.work_lines.is_empty() && !parsed.work_lines.is_empty() {
            self.work_lines = parsed.work_lines.clone();
            changed = true;
        }

        changed
    }
}

fn fill(target: &mut String, source: &Option<String>) -> bool {
    match source {
        Some(value) if target.trim().is_empty() => {
            *target = value.clone();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Format;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const LEGACY_BLOB: &str = "ProjectInfo,,,,,C-17,,,UG1,270289,,14/8/2025,RPT-1,1557,David Bullock,Elektro\n\
                               1,R9,Taster,montiert,2,1.5,14/8/2025,,,270289,UG1";

    fn pending_report() -> Report {
        Report {
            id: "7".into(),
            customer: "Stadtwerke".into(),
            report_date: "2025-08-14".into(),
            report_data: LEGACY_BLOB.into(),
            ..Report::default()
        }
    }

    #[test]
    fn test_parse_blob_uses_report_date() {
        let report = pending_report();
        let parsed = report.parse_blob(&IngestConfig::default()).unwrap();
        assert_eq!(parsed.format, Format::Legacy);
        assert_eq!(parsed.work_lines.len(), 1);
    }

    #[test]
    fn test_backfill_fills_only_missing_fields() {
        let mut report = pending_report();
        let parsed = report.parse_blob(&IngestConfig::default()).unwrap();

        assert!(report.backfill(&parsed));
        assert_eq!(report.project_number, "270289");
        assert_eq!(report.report_number, "RPT-1");
        assert_eq!(report.employee, "David Bullock");
        assert_eq!(report.employee_id, "1557");
        assert_eq!(report.concern_id, "C-17");
        assert_eq!(report.work_date, "14/8/2025");
        // already set, kept
        assert_eq!(report.customer, "Stadtwerke");
        assert_eq!(report.report_date, "2025-08-14");
        assert_eq!(report.total_hours, Some(Decimal::new(15, 1)));
        assert_eq!(report.work_lines.len(), 1);

        assert!(!report.backfill(&parsed));
    }

    #[test]
    fn test_approved_report_untouched() {
        let mut report = Report {
            status: ReportStatus::Approved,
            ..pending_report()
        };
        let before = report.clone();
        let parsed = report.parse_blob(&IngestConfig::default()).unwrap();

        assert!(!report.backfill(&parsed));
        assert_eq!(report, before);
    }

    #[test]
    fn test_blank_blob() {
        let report = Report {
            report_data: "   ".into(),
            ..Report::default()
        };
        assert!(report.parse_blob(&IngestConfig::default()).is_none());
    }
}
