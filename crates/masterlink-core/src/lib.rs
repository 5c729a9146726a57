//! Masterlink core library: telegram codec, typed decoding and capture analysis.
//!
//! Layers, leaves first: reference tables (`names`) map raw codes to labels;
//! the telegram codec (layout/reader/parser/writer) turns transport buffers
//! into [`Telegram`] values and back; the classifier turns a telegram into a
//! [`DecodedTelegram`] variant; sources feed the analysis layer, which
//! aggregates decoded telegrams into a deterministic [`Report`].
//! Decoding is byte-oriented and side-effect free; file I/O is isolated in
//! `source`.
//!
//! Invariants:
//! - Parsing fails only on structural problems; checksum mismatches are
//!   reported by [`Telegram::verify`] and left to the caller's policy.
//! - Classification is total: unknown payload types decode to
//!   [`DecodedTelegram::Unknown`].
//! - Report outputs are deterministic and stable across runs.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use masterlink_core::analyze_capture_file;
//!
//! let report = analyze_capture_file(Path::new("capture.txt"))?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod protocols;
mod source;

pub use analysis::{
    AnalysisError, AnalysisOptions, ChecksumPolicy, analyze_capture_file,
    analyze_capture_file_with, analyze_source,
};
pub use protocols::decoded::{
    AudioBus, AudioBusMeaning, DecodedTelegram, DisplayData, GotoSource, GotoSourceMeaning,
    MasterPresent, Metadata, StatusInfo, Surprise, TelegramKind, TrackInfo, Unknown, classify,
    decode_telegram,
};
pub use protocols::common::reader::hex_string;
pub use protocols::names;
pub use protocols::telegram::{
    Telegram, TelegramError, checksum, parse_telegram, serialize_telegram,
};
pub use source::{
    CaptureFileSource, CaptureSource, LineError, SourceError, TelegramEvent, TelegramSource,
    decode_hex,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no capture time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Aggregated analysis report with deterministic ordering.
///
/// # Examples
/// ```
/// use masterlink_core::make_stub_report;
///
/// let report = make_stub_report("capture.txt", 123);
/// assert_eq!(report.report_version, masterlink_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input capture metadata.
    pub input: InputInfo,

    /// Optional capture summary (may be empty when unavailable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_summary: Option<CaptureSummary>,
    /// Decoded telegrams in capture order.
    pub telegrams: Vec<TelegramRecord>,
    /// Per payload-type counters, ascending by code.
    pub payload_types: Vec<PayloadTypeSummary>,
    /// Protocol compliance summaries in stable order.
    pub compliance: Vec<ComplianceSummary>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "mldecode").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
///
/// # Examples
/// ```
/// use masterlink_core::InputInfo;
///
/// let input = InputInfo {
///     path: "capture.txt".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Basic capture summary (timestamps may be absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSummary {
    /// Telegram lines read from the capture.
    pub telegrams_total: u64,
    /// Telegrams that made it into `Report::telegrams`.
    pub telegrams_decoded: u64,
    /// RFC3339 timestamp of the earliest telegram (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    /// RFC3339 timestamp of the latest telegram (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}

/// One decoded telegram.
///
/// Codes are kept raw so unknown values survive; `summary` carries the
/// labelled rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramRecord {
    /// Capture line the telegram was read from.
    pub line: usize,
    /// RFC3339 capture time, when the line was timestamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub kind: TelegramKind,
    pub payload_type: u8,
    pub telegram_type: u8,
    pub src_node: u8,
    pub src_src: u8,
    pub dest_node: u8,
    pub dest_src: u8,
    pub checksum_ok: bool,
    /// Rendered diagnostic line.
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surprises: Vec<Surprise>,
}

/// Counters for one payload-type code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadTypeSummary {
    pub code: u8,
    /// Reference label, `???` for unknown codes.
    pub name: String,
    pub kind: TelegramKind,
    /// Telegrams seen with this code, corrupt ones included.
    pub count: u64,
    pub checksum_failures: u64,
    /// Telegrams flagged with at least one metadata surprise.
    pub surprises: u64,
}

/// Compliance summary for a protocol.
///
/// # Examples
/// ```
/// use masterlink_core::{ComplianceSummary, Violation};
///
/// let summary = ComplianceSummary {
///     protocol: "masterlink".to_string(),
///     compliance_percentage: 100.0,
///     violations: vec![Violation {
///         id: "ML-CHECKSUM".to_string(),
///         severity: "error".to_string(),
///         message: "Checksum mismatch".to_string(),
///         count: 1,
///         examples: Vec::new(),
///     }],
/// };
/// assert_eq!(summary.violations.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Protocol name ("masterlink").
    pub protocol: String,
    /// Compliance percentage (0.0 to 100.0).
    pub compliance_percentage: f64,
    /// Violations sorted by severity and ID.
    pub violations: Vec<Violation>,
}

/// Single compliance violation record.
///
/// # Examples
/// ```
/// use masterlink_core::Violation;
///
/// let violation = Violation {
///     id: "ML-TOO-SHORT".to_string(),
///     severity: "error".to_string(),
///     message: "Telegram too short".to_string(),
///     count: 1,
///     examples: vec!["line 4 @ 2023-11-14T22:13:20Z".to_string()],
/// };
/// assert_eq!(violation.count, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Stable violation identifier (e.g., `ML-CHECKSUM`).
    pub id: String,
    /// Severity label (`error` or `warning`).
    pub severity: String,
    /// Human-readable message explaining the violation.
    pub message: String,
    /// Number of occurrences aggregated into this violation.
    pub count: u64,
    /// At most three example contexts, formatted as `line N @ ts`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use masterlink_core::make_stub_report;
///
/// let report = make_stub_report("capture.txt", 123);
/// assert_eq!(report.tool.name, "mldecode");
/// assert!(report.telegrams.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "mldecode".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        capture_summary: None,
        telegrams: vec![],
        payload_types: vec![],
        compliance: vec![],
    }
}
