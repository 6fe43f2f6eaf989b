use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use iwrange_core::range::{PROFILES, RangeProfile, RangeRecord, check_plausibility};
use iwrange_core::{FileRangeSource, QueryError, RangeReport, make_report};
use time::OffsetDateTime;

mod logger;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("IWRANGE_BUILD_COMMIT"),
    " ",
    env!("IWRANGE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "iwrange")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Query Wireless Extensions range info and report the link-quality ceiling.",
    long_about = None,
    after_help = "Examples:\n  iwrange quality wlan0\n  iwrange range wlan0 --stdout --pretty\n  iwrange decode wlan0-range.bin -o report.json"
)]
struct Cli {
    /// Canonical iw_range layout to decode into
    #[arg(long, global = true, env = "IWRANGE_PROFILE", default_value = "kernel")]
    profile: String,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value_t = tracing::Level::WARN)]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the maximum link quality a wireless device reports.
    Quality {
        /// Network interface name (e.g., wlan0)
        device: String,

        /// Decode a raw range reply from this file instead of the device
        #[arg(long)]
        from_file: Option<PathBuf>,

        /// Reported reply length for --from-file (defaults to the file size)
        #[arg(long, requires = "from_file")]
        reported_len: Option<usize>,
    },
    /// Query a device and write its decoded range record as a JSON report.
    Range {
        /// Network interface name (e.g., wlan0)
        device: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Decode a raw range reply captured to a file.
    Decode {
        /// Path to the raw reply
        input: PathBuf,

        /// Reported reply length (defaults to the file size)
        #[arg(long)]
        reported_len: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Fail when the reply does not plausibly match a known iw_range layout
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logger::init(cli.log_level) {
        eprintln!("warning: logging disabled: {err}");
    }
    tracing::debug!(?cli, "parsed arguments");

    let result = resolve_profile(&cli.profile).and_then(|profile| match cli.command {
        Commands::Quality {
            device,
            from_file,
            reported_len,
        } => cmd_quality(profile, &device, from_file, reported_len),
        Commands::Range { device, output } => cmd_range(profile, &device, &output),
        Commands::Decode {
            input,
            reported_len,
            output,
        } => cmd_decode(profile, &input, reported_len, &output),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<QueryError> for CliError {
    fn from(err: QueryError) -> Self {
        let hint = match err.kind() {
            io::ErrorKind::PermissionDenied => "run as root or grant CAP_NET_ADMIN",
            io::ErrorKind::Unsupported => "the device does not support Wireless Extensions",
            io::ErrorKind::InvalidInput => "interface names are 1 to 15 bytes, without NUL",
            io::ErrorKind::NotFound => "check the path or device name",
            _ => "check the device name with `ip link`",
        };
        CliError::new(err.to_string(), Some(hint.to_string()))
    }
}

fn resolve_profile(name: &str) -> Result<&'static RangeProfile, CliError> {
    RangeProfile::by_name(name).ok_or_else(|| {
        CliError::new(
            format!("unknown profile '{name}'"),
            Some(format!(
                "available profiles: {}",
                PROFILES
                    .iter()
                    .map(|profile| format!("{} ({})", profile.name, profile.description))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        )
    })
}

fn cmd_quality(
    profile: &RangeProfile,
    device: &str,
    from_file: Option<PathBuf>,
    reported_len: Option<usize>,
) -> Result<(), CliError> {
    let max = match from_file {
        Some(path) => {
            validate_input_file(&path)?;
            let mut source = file_source(path, reported_len);
            iwrange_core::max_quality(&mut source, profile, device)?
        }
        None => iwrange_core::query_device_range(profile, device)?
            .max_qual()
            .qual,
    };
    println!("{max}");
    Ok(())
}

fn cmd_range(profile: &RangeProfile, device: &str, output: &OutputArgs) -> Result<(), CliError> {
    let record = iwrange_core::query_device_range(profile, device)?;
    let report = make_report(device, &record, Some(OffsetDateTime::now_utc()));
    emit_report(&report, &record, output)
}

fn cmd_decode(
    profile: &RangeProfile,
    input: &Path,
    reported_len: Option<usize>,
    output: &OutputArgs,
) -> Result<(), CliError> {
    validate_input_file(input)?;
    ensure_distinct_output(input, output)?;

    let mut source = file_source(input.to_path_buf(), reported_len);
    let label = input.display().to_string();
    let record = iwrange_core::query_range(&mut source, profile, &label)?;

    let modified = fs::metadata(input)
        .and_then(|meta| meta.modified())
        .ok()
        .map(OffsetDateTime::from);
    let report = make_report(&label, &record, modified);
    emit_report(&report, &record, output)
}

fn file_source(path: PathBuf, reported_len: Option<usize>) -> FileRangeSource {
    let source = FileRangeSource::new(path);
    match reported_len {
        Some(len) => source.with_reported_len(len),
        None => source,
    }
}

fn emit_report(
    report: &RangeReport,
    record: &RangeRecord,
    output: &OutputArgs,
) -> Result<(), CliError> {
    let json = serialize_report(report, output.pretty, output.compact)?;

    if output.stdout {
        println!("{}", json);
    } else {
        let path = output.report.as_ref().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        if !output.quiet {
            eprintln!("OK: report written -> {}", path.display());
        }
    }

    if output.strict {
        check_plausibility(record).map_err(|err| {
            CliError::new(
                format!("implausible range reply: {err}"),
                Some("the driver may use an unknown iw_range layout; rerun without --strict to inspect".to_string()),
            )
        })?;
    }
    Ok(())
}

fn serialize_report(report: &RangeReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(report)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(report)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("capture a raw SIOCGIWRANGE reply first".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the raw reply dump, not a directory".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(input: &Path, output: &OutputArgs) -> Result<(), CliError> {
    let Some(report) = output.report.as_ref() else {
        return Ok(());
    };
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let same = fs::canonicalize(report)
        .map(|report_abs| report_abs == input_abs)
        .unwrap_or(false);
    if same {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}
