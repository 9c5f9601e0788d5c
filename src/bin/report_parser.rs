//! Report Parser - CLI tool for reading mobile report exports.

use clap::Parser;
use report_ingest::{
    csv_export::write_work_lines_csv, Format, IngestConfig, ParseDiagnostics, ParsedReport,
    ReportHeader, Result, WorkLine,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "report_parser")]
#[command(about = "Parse a field report export (legacy or newer layout)", long_about = None)]
struct Cli {
    /// Input file path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Recorded report date, used to pick the layout
    #[arg(long = "report-date")]
    report_date: Option<String>,

    /// Force a layout (legacy, newer) instead of detecting it
    #[arg(long)]
    format: Option<String>,

    /// Output format (json, csv)
    #[arg(long = "output-format", default_value = "json")]
    output_format: String,

    /// Output file path (or stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cutoff date between the layouts (YYYY-MM-DD)
    #[arg(long)]
    cutoff: Option<String>,

    /// Log parser decisions and dropped rows
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportOutput<'a> {
    format: Format,
    #[serde(flatten)]
    header: ReportHeader,
    total_hours: Decimal,
    work_lines: &'a [WorkLine],
    diagnostics: &'a ParseDiagnostics,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = IngestConfig::load(cli.config.as_deref())?;
    if let Some(ref cutoff) = cli.cutoff {
        config = config.with_cutoff(cutoff)?;
    }

    let mut blob = String::new();
    if let Some(ref input_path) = cli.input {
        File::open(input_path)?.read_to_string(&mut blob)?;
    } else {
        io::stdin().read_to_string(&mut blob)?;
    }

    let format = match cli.format {
        Some(ref name) => name.parse::<Format>()?,
        None => Format::detect(cli.report_date.as_deref(), config.cutoff_date),
    };
    let report = format.parse(&blob, &config)?;

    for dropped in &report.diagnostics.dropped {
        log::info!("line {} dropped: {}", dropped.line, dropped.reason);
    }

    if let Some(ref output_path) = cli.output {
        let mut file = File::create(output_path)?;
        write_output(&mut file, &report, &config, &cli.output_format)?;
    } else {
        let mut stdout = io::stdout();
        write_output(&mut stdout, &report, &config, &cli.output_format)?;
    }

    Ok(())
}

fn write_output<W: Write>(
    writer: &mut W,
    report: &ParsedReport,
    config: &IngestConfig,
    output_format: &str,
) -> Result<()> {
    match output_format.to_lowercase().as_str() {
        "json" => {
            let output = ReportOutput {
                format: report.format,
                header: config.header(report),
                total_hours: report.total_hours(),
                work_lines: &report.work_lines,
                diagnostics: &report.diagnostics,
            };
            serde_json::to_writer_pretty(&mut *writer, &output)?;
            writeln!(writer)?;
        }
        "csv" => write_work_lines_csv(report, writer)?,
        other => return Err(report_ingest::Error::InvalidFormat(other.to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_fills_missing_fields() {
        let blob = "linenumber,component,workDone,quantity,hours,activeProject,location,dateCreated,UIDAB,mitarbeiterID,mitarbeiterName,activeprojectName,gewerk\n\
                    1,Einrichtung,,,1,270300,,2025-09-02,RPT-9,1557,David Bullock,,Elektro\n\
                    2,Taster,montiert,4,2.5,270300,,2025-09-02,RPT-9,1557,David Bullock,,Elektro";
        let config = IngestConfig {
            placeholder: "n/a".into(),
            ..IngestConfig::default()
        };
        let report = Format::Newer.parse(blob, &config).unwrap();

        let mut out = Vec::new();
        write_output(&mut out, &report, &config, "json").unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["projectNumber"], "270300");
        assert_eq!(json["workLocation"], "n/a");
        assert_eq!(json["customer"], "n/a");
        assert_eq!(json["concernId"], "n/a");
        assert_eq!(json["format"], "newer");
        assert_eq!(json["workLines"].as_array().unwrap().len(), 1);
    }
}
