use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use masterlink_core::names::{self, source_by_name};
use masterlink_core::{
    AnalysisOptions, AudioBus, ChecksumPolicy, DecodedTelegram, GotoSource, MasterPresent,
    StatusInfo, Telegram, TelegramError, TelegramKind, TrackInfo, decode_hex, decode_telegram,
    hex_string, parse_telegram,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const INPUT_EXTENSIONS: [&str; 3] = ["txt", "log", "mlcap"];

#[derive(Parser, Debug)]
#[command(name = "mldecode")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("MLDECODE_BUILD_COMMIT"),
    ", ",
    env!("MLDECODE_BUILD_DATE"),
    ")"
))]
#[command(
    about = "Decoder and telegram builder for Bang & Olufsen Masterlink captures.",
    long_about = None,
    after_help = "Examples:\n  mldecode capture analyse living-room.txt -o report.json\n  mldecode telegram decode 80C0010B0000000403040101015A\n  mldecode telegram build goto-source --source CD"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on text captures of Masterlink traffic.
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
    /// Decode or synthesize single telegrams.
    Telegram {
        #[command(subcommand)]
        command: TelegramCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Analyse a capture file and generate a versioned JSON report.
    #[command(alias = "analyze")]
    #[command(
        after_help = "Examples:\n  mldecode capture analyse capture.txt -o report.json\n  mldecode capture analyze 'captures/*.mlcap' --stdout --pretty"
    )]
    Analyse(AnalyseArgs),
}

#[derive(Args, Debug)]
struct AnalyseArgs {
    /// Path (or glob matching one file) to a .txt, .log or .mlcap capture
    input: PathBuf,

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

    /// Exit with a non-zero code if compliance violations are present
    #[arg(long)]
    strict: bool,

    /// List compliance violations after analysis
    #[arg(long)]
    list_violations: bool,

    /// Leave telegrams with a bad checksum out of the report records
    #[arg(long)]
    drop_corrupt: bool,
}

#[derive(Subcommand, Debug)]
enum TelegramCommands {
    /// Decode one telegram given as hex bytes.
    Decode {
        /// Telegram bytes, e.g. "80 C0 01 0B ..." or 80C0010B...
        #[arg(required = true, num_args = 1..)]
        hex: Vec<String>,

        /// Print the decoded telegram as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a ready-to-send telegram and print it as hex.
    Build {
        #[arg(value_enum)]
        kind: BuildKind,

        /// Source name (e.g. CD, RADIO) or code (e.g. 0x8D)
        #[arg(long)]
        source: Option<String>,
    },
    /// Answer a MASTER_PRESENT request and print the reply as hex.
    Reply {
        /// Request bytes as hex
        #[arg(required = true, num_args = 1..)]
        hex: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BuildKind {
    TrackInfo,
    StatusInfo,
    GotoSource,
    AudioBusRequest,
}

impl BuildKind {
    fn name(self) -> &'static str {
        match self {
            BuildKind::TrackInfo => "track-info",
            BuildKind::StatusInfo => "status-info",
            BuildKind::GotoSource => "goto-source",
            BuildKind::AudioBusRequest => "audio-bus-request",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Capture { command } => match command {
            CaptureCommands::Analyse(args) => cmd_capture_analyse(args),
        },
        Commands::Telegram { command } => match command {
            TelegramCommands::Decode { hex, json } => cmd_telegram_decode(&hex, json),
            TelegramCommands::Build { kind, source } => {
                cmd_telegram_build(kind, source.as_deref())
            }
            TelegramCommands::Reply { hex } => cmd_telegram_reply(&hex),
        },
    };

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

/// Logs go to stderr so stdout stays machine readable. `-v` wins over
/// `RUST_LOG`; without either only warnings are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
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

fn cmd_capture_analyse(args: AnalyseArgs) -> Result<(), CliError> {
    let AnalyseArgs {
        input,
        report,
        stdout,
        pretty,
        compact,
        quiet,
        strict,
        list_violations,
        drop_corrupt,
    } = args;

    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let meta = fs::metadata(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;

    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .txt, .log or .mlcap capture".to_string()),
        ));
    }

    let options = AnalysisOptions {
        checksum_policy: if drop_corrupt {
            ChecksumPolicy::Drop
        } else {
            ChecksumPolicy::Flag
        },
    };
    info!(input = %resolved_input.display(), ?options, "analysing capture");
    let rep = masterlink_core::analyze_capture_file_with(&resolved_input, &options)
        .context("capture analysis failed")?;
    let json = serialize_report(&rep, pretty, compact)?;

    let Some(report) = report else {
        print!("{}", json);
        if list_violations && !quiet {
            print_violations(&rep);
        }
        return check_strict(strict, &rep);
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if list_violations && !quiet {
        print_violations(&rep);
    }
    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    check_strict(strict, &rep)
}

/// A report inside a directory that does not exist yet cannot be the input.
fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Ok(());
    }
    let report_dir = fs::canonicalize(parent)
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn check_strict(strict: bool, rep: &masterlink_core::Report) -> Result<(), CliError> {
    if strict && has_violations(rep) {
        return Err(CliError::new(
            "compliance violations detected",
            Some("use --list-violations to inspect".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(
    rep: &masterlink_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn has_violations(rep: &masterlink_core::Report) -> bool {
    rep.compliance
        .iter()
        .any(|entry| !entry.violations.is_empty())
}

fn print_violations(rep: &masterlink_core::Report) {
    let mut entries: Vec<_> = rep.compliance.iter().collect();
    entries.sort_by(|a, b| a.protocol.cmp(&b.protocol));
    eprintln!("Compliance violations:");
    for entry in entries {
        let mut violations = entry.violations.clone();
        violations.sort_by(|a, b| a.id.cmp(&b.id));
        for violation in violations {
            eprintln!(
                "  {} {} ({})",
                entry.protocol, violation.id, violation.count
            );
        }
    }
}

/// JSON shape of `telegram decode --json`.
#[derive(Debug, Serialize)]
struct DecodeOutput {
    kind: TelegramKind,
    checksum_ok: bool,
    summary: String,
    bytes: String,
}

fn cmd_telegram_decode(hex: &[String], json: bool) -> Result<(), CliError> {
    let raw = parse_hex_arg(hex)?;
    let telegram = parse_telegram_arg(&raw)?;
    let checksum_ok = match telegram.verify() {
        Ok(()) => true,
        Err(err) => {
            eprintln!("warning: {err}");
            false
        }
    };
    let decoded = decode_telegram(telegram);

    if json {
        let output = DecodeOutput {
            kind: decoded.kind(),
            checksum_ok,
            summary: decoded.render(),
            bytes: hex_string(&raw),
        };
        let text = serde_json::to_string(&output).context("JSON serialization failed")?;
        println!("{text}");
    } else {
        println!("{}", decoded.render());
    }
    Ok(())
}

fn cmd_telegram_build(kind: BuildKind, source: Option<&str>) -> Result<(), CliError> {
    let telegram = match kind {
        BuildKind::AudioBusRequest => {
            if source.is_some() {
                warn!("--source is ignored for audio-bus-request");
            }
            AudioBus::status_request()
        }
        BuildKind::TrackInfo | BuildKind::StatusInfo | BuildKind::GotoSource => {
            let Some(source) = source else {
                return Err(CliError::new(
                    format!("{} needs --source", kind.name()),
                    Some("pass a source name such as CD or a code such as 0x8D".to_string()),
                ));
            };
            let code = parse_source_arg(source)?;
            match kind {
                BuildKind::TrackInfo => TrackInfo::for_source(code),
                BuildKind::StatusInfo => StatusInfo::for_source(code),
                _ => GotoSource::request(code),
            }
        }
    };
    print_telegram(&telegram)
}

fn cmd_telegram_reply(hex: &[String]) -> Result<(), CliError> {
    let raw = parse_hex_arg(hex)?;
    let telegram = parse_telegram_arg(&raw)?;
    if let Err(err) = telegram.verify() {
        eprintln!("warning: {err}");
    }
    let request = match decode_telegram(telegram) {
        DecodedTelegram::MasterPresent(present) if present.is_request() => present,
        other => {
            return Err(CliError::new(
                format!("not a MASTER_PRESENT request: {}", other.render()),
                Some("reply only answers presence polls (payload type 0x04, REQUEST)".to_string()),
            ));
        }
    };
    print_telegram(&MasterPresent::reply_from_request(&request))
}

fn print_telegram(telegram: &Telegram) -> Result<(), CliError> {
    let bytes = telegram.to_bytes().context("telegram serialization failed")?;
    debug!(telegram = %decode_telegram(telegram.clone()), "built telegram");
    println!("{}", hex_string(&bytes));
    Ok(())
}

fn parse_hex_arg(hex: &[String]) -> Result<Vec<u8>, CliError> {
    let joined = hex.join(" ");
    decode_hex(&joined).map_err(|err| {
        CliError::new(
            format!("invalid hex telegram: {err}"),
            Some("pass bytes as hex pairs, e.g. \"80 C0 01 0B\"".to_string()),
        )
    })
}

fn parse_telegram_arg(raw: &[u8]) -> Result<Telegram, CliError> {
    parse_telegram(raw).map_err(|err| {
        let hint = match &err {
            TelegramError::TooShort { .. } => {
                "a telegram is a 10 byte header, the payload and a checksum byte"
            }
            _ => "byte 2 must be 0x01 and byte 6 must be 0x00",
        };
        CliError::new(format!("invalid telegram: {err}"), Some(hint.to_string()))
    })
}

fn parse_source_arg(value: &str) -> Result<u8, CliError> {
    let hex = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"));
    let code = match hex {
        Some(digits) => u8::from_str_radix(digits, 16).ok(),
        None => source_by_name(value),
    };
    let code = code.ok_or_else(|| {
        CliError::new(
            format!("unknown source '{value}'"),
            Some("use a name such as CD, RADIO, DVD or a code such as 0x8D".to_string()),
        )
    })?;
    if names::source_name(code).is_none() {
        warn!(code, "building telegram for a source without a known name");
    }
    Ok(code)
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .txt, .log or .mlcap capture".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !INPUT_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .txt, .log or .mlcap capture".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .txt, .log or .mlcap".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single capture file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        message.push_str("; matches: ");
        message.push_str(&listed);
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
