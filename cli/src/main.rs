//! rostersql CLI - roster workbook to SQL migration tool
//!
//! Reads membership and office-bearer workbooks and writes a SQL script,
//! or dumps worksheet rows as JSON for inspection.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rostersql::migrate::{build_script_from_workbooks, MigrationOptions};
use rostersql::xlsx::{read_package, worksheets, SharedStrings};
use rostersql::{Package, SheetSelector};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Roster workbook (.xlsx) to SQL migration
#[derive(Parser)]
#[command(
    name = "rostersql",
    version,
    about = "Turn roster workbooks into SQL migrations",
    long_about = "rostersql - reads membership and office-bearer workbooks (.xlsx)\n\
                  and emits a SQL script with the schema and INSERT statements."
)]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump a worksheet's rows as JSON
    Rows {
        /// Input workbook path
        input: PathBuf,

        /// Worksheet part, e.g. sheet2.xml or xl/worksheets/sheet2.xml
        #[arg(long, conflicts_with = "sheet_name")]
        sheet: Option<String>,

        /// Worksheet display name
        #[arg(long)]
        sheet_name: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Generate the SQL migration script
    Sql {
        /// Membership workbook (A: name, B: rotary ID, C: role, D: year, E: email, F: phone)
        #[arg(long)]
        members: PathBuf,

        /// Office-bearers workbook (A: role, B: name, C: email, D: phone)
        #[arg(long)]
        bearers: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out CREATE TABLE statements
        #[arg(long)]
        no_schema: bool,

        /// Leave out TRUNCATE statements
        #[arg(long)]
        no_truncate: bool,
    },

    /// Show worksheets and row counts
    Info {
        /// Input workbook path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rostersql=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Rows {
            input,
            sheet,
            sheet_name,
            output,
            compact,
        } => {
            let selector = match (sheet, sheet_name) {
                (Some(part), _) => SheetSelector::Part(part),
                (None, Some(name)) => SheetSelector::Name(name),
                (None, None) => SheetSelector::First,
            };

            let pb = create_spinner("Reading worksheet...");
            let rows = rostersql::read(&input, &selector)?;
            pb.finish_and_clear();

            let json = if compact {
                serde_json::to_string(&rows)?
            } else {
                serde_json::to_string_pretty(&rows)?
            };
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!(
                    "{} Wrote {} rows: {}",
                    "✓".green().bold(),
                    rows.len(),
                    path.display()
                );
            }
        }

        Commands::Sql {
            members,
            bearers,
            output,
            no_schema,
            no_truncate,
        } => {
            let options = MigrationOptions::new()
                .with_schema(!no_schema)
                .with_truncate(!no_truncate);

            let pb = create_spinner("Reading workbooks...");
            let script = build_script_from_workbooks(&members, &bearers, &options)?;
            pb.finish_and_clear();

            match output {
                Some(path) => {
                    script.write_to(&path)?;
                    println!(
                        "{} Wrote {} statements: {}",
                        "✓".green().bold(),
                        script.len(),
                        path.display()
                    );
                }
                None => write_output(None, &script.to_sql())?,
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing workbook...");

            let package = Package::open(&input)?;
            let sheets = worksheets(&package)?;
            let shared_strings = SharedStrings::load(&package)?;
            let first_sheet = read_package(&package, &SheetSelector::First);

            pb.finish_and_clear();

            println!("{}", "Workbook Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Shared strings".bold(), shared_strings.len());

            println!("\n{}", "Worksheets".cyan().bold());
            println!("{}", "─".repeat(40));
            if sheets.is_empty() {
                println!("{}", "(none listed in workbook)".dimmed());
            }
            for sheet in &sheets {
                match &sheet.part {
                    Some(part) => println!("{}: {}", sheet.name.bold(), part),
                    None => println!("{}: {}", sheet.name.bold(), "(unresolved)".dimmed()),
                }
            }

            match first_sheet {
                Ok(rows) => {
                    let blank = rows.iter().filter(|r| r.is_empty()).count();
                    println!("\n{}: {} ({} blank)", "First sheet rows".bold(), rows.len(), blank);
                }
                Err(e) => {
                    println!("\n{} First sheet unreadable: {}", "!".yellow().bold(), e);
                }
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "rostersql".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Roster workbook (.xlsx) to SQL migration");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
