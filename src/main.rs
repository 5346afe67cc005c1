mod debug_report;

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use chrono::NaiveDate;
use log::warn;
use slotlist::{
    ConfigError, Context, DatedAttendance, EventDate, ExternalAttendance, Options, Tables, ThreadExtraction,
    extract_verbose_with,
};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("error: {0}")]
    Usage(String),
    #[error("error: can't read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error: invalid attendance file {}: {source}", path.display())]
    Attendance {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("error: {0}")]
    Config(#[from] ConfigError),
    #[error("error: can't write JSON: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let config = parse_args()?;

    let page = read(&config.thread)?;
    let lines: Vec<&str> = page.lines().collect();

    let loaded;
    let tables = match &config.data {
        Some(dir) => {
            loaded = Tables::load_dir(dir)?;
            &loaded
        }
        None => Tables::bundled()?,
    };

    let attendance = match &config.attendance {
        Some(path) => load_attendance(path)?,
        None => BTreeMap::new(),
    };

    let context = Context { reference_date: config.reference_date, source_url: config.url.clone() };
    let options = Options { report_missing_attendance: config.report_missing };
    let out = extract_verbose_with(&lines, tables, &context, &options, &attendance);

    if config.json {
        for diagnostic in &out.diagnostics {
            warn!("{diagnostic}");
        }
        let plain = ThreadExtraction { outcome: out.outcome, diagnostics: out.diagnostics, elapsed: out.elapsed };
        println!("{}", serde_json::to_string_pretty(&plain)?);
    } else {
        debug_report::print_run(&config.thread.display().to_string(), &out, config.color);
    }

    Ok(())
}

struct CliConfig {
    thread: PathBuf,
    attendance: Option<PathBuf>,
    data: Option<PathBuf>,
    url: Option<String>,
    reference_date: NaiveDate,
    report_missing: bool,
    json: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, CliError> {
    let mut thread: Option<PathBuf> = None;
    let mut attendance = None;
    let mut data = None;
    let mut url = None;
    let mut reference_date = Context::default().reference_date;
    let mut report_missing = false;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline.clone().or_else(|| args.next()).ok_or_else(|| CliError::Usage(format!("{name} expects a value")))
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("slotlist {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--report-missing" => report_missing = true,
            "--attendance" => attendance = Some(PathBuf::from(value("--attendance")?)),
            "--data" => data = Some(PathBuf::from(value("--data")?)),
            "--url" => url = Some(value("--url")?),
            "--reference" => reference_date = parse_reference(&value("--reference")?)?,
            _ if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option '{arg}'")));
            }
            _ => {
                if thread.is_some() {
                    return Err(CliError::Usage("thread file provided multiple times".to_string()));
                }
                thread = Some(PathBuf::from(arg));
            }
        }
    }

    let Some(thread) = thread else {
        return Err(CliError::Usage(format!("no thread file provided\n\n{}", help_text())));
    };

    Ok(CliConfig { thread, attendance, data, url, reference_date, report_missing, json, color })
}

fn parse_reference(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CliError::Usage(format!("invalid --reference '{value}' (expected YYYY-MM-DD)")))
}

fn read(path: &PathBuf) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.clone(), source })
}

fn load_attendance(path: &PathBuf) -> Result<BTreeMap<EventDate, ExternalAttendance>, CliError> {
    let text = read(path)?;
    let records: Vec<DatedAttendance> =
        serde_json::from_str(&text).map_err(|source| CliError::Attendance { path: path.clone(), source })?;
    Ok(records.into_iter().map(|r| (r.date, r.attendance)).collect())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "slotlist {version}

Extract an event record and its slot list from a saved forum thread.

Usage:
  slotlist [OPTIONS] <thread-file>

Options:
  --attendance <file>        JSON list of {{ date, category, players }} records
                             to reconcile the slot list against.
  --data <dir>               Load correction tables from this directory instead
                             of the bundled ones.
  --url <url>                URL the thread was saved from (thread id source).
  --reference <date>         Reference date in YYYY-MM-DD. Default: today.
  --report-missing           Report past events without attendance records.
  --json                     Print the result as JSON; diagnostics go to the log.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter (default: warn).

Exit codes:
  0  Success.
  1  I/O or configuration error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
