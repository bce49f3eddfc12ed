//! openlog CLI
//!
//! Thin wrapper around openlog-core for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Log a message (INFO by default)
//! openlog log "Service started"
//!
//! # Log several messages as one batch at WARN, also writing ./logs/log.txt
//! openlog --write-to-file --in-dir log --level warn "disk at 91%" "disk at 95%"
//!
//! # Log a JSON document as a structured value
//! echo '{"port": 8080, "workers": 4}' | openlog --prefix API show
//!
//! # Only pretty-print a JSON document
//! openlog render --file config.json
//!
//! # Dump a log file as JSON lines
//! openlog read logs/log.txt
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use openlog_core::{read_records, Formatter, Level, LogError, Logger, LoggerConfig, Value};

/// openlog - structured console/file logging
#[derive(Parser)]
#[command(name = "openlog")]
#[command(version = "0.1.0")]
#[command(about = "Structured console/file logging with a pretty-printer for nested data")]
struct Cli {
    /// Increase verbosity of internal diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config file; flags given on the command line take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also write entries to a log file
    #[arg(long, global = true)]
    write_to_file: bool,

    /// Keep the log file under a `logs` directory
    #[arg(long, global = true)]
    in_dir: bool,

    /// Name the log file after the current time
    #[arg(long, global = true)]
    session: bool,

    /// Prefix shown on the first line of every entry
    #[arg(short, long, global = true)]
    prefix: Option<String>,

    /// Show HH:MM timestamps on the console
    #[arg(long, global = true)]
    short_timestamp: bool,

    /// Render width (default: terminal width, or 80)
    #[arg(short, long, global = true)]
    width: Option<usize>,

    /// Directory the log file is placed under (default: current directory)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log one or more messages
    Log {
        /// Level: info, error, warn or init
        #[arg(short, long, default_value = "info", value_parser = parse_level)]
        level: Level,

        /// Messages; more than one is logged as a batch
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Log a JSON document as a structured value
    Show {
        /// Level: info, error, warn or init
        #[arg(short, long, default_value = "info", value_parser = parse_level)]
        level: Level,

        /// JSON file to read (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the formatted rendering of a JSON document without logging it
    Render {
        /// JSON file to read (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the records of a log file as JSON lines
    Read {
        /// Log file path
        path: PathBuf,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Parse a level name (case-insensitive)
fn parse_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|e: LogError| e.to_string())
}

/// Config file (if any) overlaid with command-line flags
fn build_config(cli: &Cli) -> Result<LoggerConfig> {
    let mut config = match &cli.config {
        Some(path) => LoggerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LoggerConfig::default(),
    };

    config.write_to_file |= cli.write_to_file;
    config.in_dir |= cli.in_dir;
    config.session |= cli.session;
    config.short_timestamp |= cli.short_timestamp;
    if let Some(prefix) = &cli.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(width) = cli.width {
        config.width = Some(width);
    }
    if let Some(dir) = &cli.dir {
        config.base_dir = Some(dir.clone());
    }
    Ok(config)
}

/// Read a JSON document from a file, or stdin when no file is given
fn read_json(file: Option<&Path>) -> Result<serde_json::Value> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("Input is not valid JSON")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match &cli.command {
        Commands::Log { level, messages } => {
            let mut logger = Logger::new(build_config(&cli)?)?;
            match messages.as_slice() {
                [single] => logger.emit(*level, single.as_str())?,
                _ => logger.emit(*level, messages.clone())?,
            }
        }

        Commands::Show { level, file } => {
            let json = read_json(file.as_deref())?;
            let mut logger = Logger::new(build_config(&cli)?)?;
            logger.emit(*level, json)?;
        }

        Commands::Render { file } => {
            let value = Value::from(read_json(file.as_deref())?);
            let formatter = build_config(&cli)?
                .width
                .map(Formatter::new)
                .unwrap_or_else(Formatter::detect);
            println!("{}", formatter.render(&value));
        }

        Commands::Read { path } => {
            let records = read_records(path)
                .with_context(|| format!("Failed to read log file {}", path.display()))?;
            for record in records {
                println!("{}", record.to_json_line()?);
            }
        }
    }

    Ok(())
}
