use std::path::PathBuf;
use std::process::ExitCode;

use calendar_page::terminal::KeyEvent;
use calendar_page::{CellRef, ConfigError, PageConfig, ReplayHost};
use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "calendar-page",
    version,
    about = "Render one calendar picker page and replay key presses against it"
)]
struct Cli {
    /// Page configuration (.yaml, .yml or .json).
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Initially focused cell, e.g. `month:4` or `day:2024-03-09`.
    #[arg(long, value_name = "CELL")]
    focus: Option<CellRef>,

    /// Key to replay; repeat for a sequence (`right`, `shift+pageup`, `enter`).
    #[arg(long = "key", value_name = "KEY", value_parser = parse_key)]
    keys: Vec<KeyEvent>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

fn parse_key(name: &str) -> Result<KeyEvent, String> {
    KeyEvent::parse(name).ok_or_else(|| format!("unknown key '{name}'"))
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let page = PageConfig::load(&cli.config)?.into_page()?;
    let mut host = ReplayHost::new(page, cli.focus);
    debug!(focus = ?host.focused(), keys = cli.keys.len(), "replaying keys");

    for key in cli.keys {
        let handled = host.press(key);
        debug!(?key, handled, focus = ?host.focused(), "key replayed");
    }

    let report = host.report();
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for line in report.page.draw_lines() {
                println!("{line}");
            }
            println!();
            println!("focus: {}", describe_cell(report.focus));
            if let Some(date) = report.selected {
                println!("selected: {date}");
            }
            if let Some(date) = report.pre_selection {
                println!("pre-selection: {date}");
            }
            if let (Some(start), end) = (report.start_date, report.end_date) {
                match end {
                    Some(end) => println!("range: {start} .. {end}"),
                    None => println!("range: {start} .."),
                }
            }
            for action in &report.actions {
                println!("  {action}");
            }
        }
    }
    Ok(())
}

fn describe_cell(cell: CellRef) -> String {
    match cell {
        CellRef::Day(date) => format!("day:{date}"),
        CellRef::Week(date) => format!("week:{date}"),
        CellRef::Month(month) => format!("month:{month}"),
        CellRef::Quarter(quarter) => format!("quarter:{quarter}"),
    }
}
