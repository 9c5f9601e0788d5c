//! Employee Sync - CLI tool for reconciling a local employee cache with the remote store.

use clap::Parser;
use report_ingest::reconcile::{
    reconcile, remote_employees, Employee, RemoteUser, SyncChanges, SyncDecision,
};
use report_ingest::Result;
use std::fs::File;
use std::io::{self, BufReader, Write};

#[derive(Parser)]
#[command(name = "employee_sync")]
#[command(about = "Compare a local employee snapshot with remote user documents", long_about = None)]
struct Cli {
    /// Local snapshot (JSON array of employees)
    #[arg(long)]
    local: String,

    /// Remote snapshot (JSON array of user documents)
    #[arg(long)]
    remote: String,

    /// Only consider remote users of this concern
    #[arg(long)]
    concern: Option<String>,

    /// Write the merged snapshot
    #[arg(long)]
    apply: bool,

    /// Where to write the merged snapshot (or stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Log reconciliation details
    #[arg(short, long)]
    verbose: bool,
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
    let local: Vec<Employee> = serde_json::from_reader(BufReader::new(File::open(&cli.local)?))?;
    let users: Vec<RemoteUser> = serde_json::from_reader(BufReader::new(File::open(&cli.remote)?))?;
    let remote = remote_employees(users, cli.concern.as_deref());

    let changes = reconcile(&local, &remote);

    if !cli.apply {
        println!("{}", describe(&changes));
        return Ok(());
    }

    eprintln!("{}", changes.summary());
    let merged = changes.resolve(&local, SyncDecision::Apply);

    if let Some(ref output_path) = cli.output {
        let mut file = File::create(output_path)?;
        serde_json::to_writer_pretty(&mut file, &merged)?;
        writeln!(file)?;
    } else {
        let mut stdout = io::stdout();
        serde_json::to_writer_pretty(&mut stdout, &merged)?;
        writeln!(stdout)?;
    }

    Ok(())
}

fn describe(changes: &SyncChanges) -> String {
    if changes.is_empty() {
        return String::from("Local snapshot is up to date.");
    }

    let mut result = format!("Changes found ({}):\n", changes.summary());
    for employee in &changes.added {
        result.push_str(&format!("  + {} {}\n", employee.id, display_name(employee)));
    }
    for employee in &changes.updated {
        result.push_str(&format!("  ~ {} {}\n", employee.id, display_name(employee)));
    }
    for id in &changes.deleted {
        result.push_str(&format!("  - {}\n", id));
    }
    result
}

fn display_name(employee: &Employee) -> String {
    let name = format!("{} {}", employee.first_name, employee.last_name);
    let name = name.trim();
    if name.is_empty() {
        format!("<{}>", employee.email)
    } else {
        name.to_string()
    }
}
