use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, warn};

use crate::protocols::decoded::decode_telegram;
use crate::protocols::telegram::parse_telegram;
use crate::source::{CaptureFileSource, SourceError, TelegramEvent, TelegramSource};
use crate::{CaptureSummary, DEFAULT_GENERATED_AT, Report, make_stub_report};

mod compliance;
mod payload_types;
mod records;

use compliance::{ComplianceStats, ViolationKind};
use payload_types::{PayloadTypeStats, add_payload_type, build_payload_type_summaries};
use records::build_record;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// What to do with telegrams whose checksum does not match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Keep the telegram in the report and flag it.
    #[default]
    Flag,
    /// Leave the telegram out of the records; it is still counted.
    Drop,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub checksum_policy: ChecksumPolicy,
}

pub fn analyze_capture_file(path: &Path) -> Result<Report, AnalysisError> {
    analyze_capture_file_with(path, &AnalysisOptions::default())
}

pub fn analyze_capture_file_with(
    path: &Path,
    options: &AnalysisOptions,
) -> Result<Report, AnalysisError> {
    let source = CaptureFileSource::open(path)?;
    analyze_source(path, source, options)
}

/// Decode every telegram of `source` into a report for `path`.
///
/// Malformed telegrams and unreadable capture lines never abort the
/// analysis; they end up as compliance violations. Only I/O failures are
/// returned as errors.
pub fn analyze_source<S: TelegramSource>(
    path: &Path,
    mut source: S,
    options: &AnalysisOptions,
) -> Result<Report, AnalysisError> {
    let mut telegrams_total = 0u64;
    let mut first_ts = None;
    let mut last_ts = None;
    let mut records = Vec::new();
    let mut payload_stats: BTreeMap<u8, PayloadTypeStats> = BTreeMap::new();
    let mut compliance = ComplianceStats::default();

    loop {
        let TelegramEvent { line, ts, data } = match source.next_telegram() {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(SourceError::Format { line, message }) => {
                warn!(line, %message, "skipping unreadable capture line");
                telegrams_total += 1;
                let context = example_context(line, None);
                compliance.add_telegram(&[ViolationKind::CaptureLine], &context);
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        telegrams_total += 1;
        update_ts_bounds(&mut first_ts, &mut last_ts, ts);
        let time = ts_to_rfc3339(ts);
        let context = example_context(line, time.as_deref());

        let telegram = match parse_telegram(&data) {
            Ok(telegram) => telegram,
            Err(err) => {
                debug!(line, error = %err, "skipping malformed telegram");
                compliance.add_telegram(&[ViolationKind::from_structural(&err)], &context);
                continue;
            }
        };

        let checksum_ok = telegram.verify().is_ok();
        if !checksum_ok && options.checksum_policy == ChecksumPolicy::Drop {
            debug!(line, "dropping telegram with bad checksum");
            add_payload_type(&mut payload_stats, telegram.payload_type, false, false);
            compliance.add_telegram(&[ViolationKind::Checksum], &context);
            continue;
        }

        let decoded = decode_telegram(telegram);
        let surprised = decoded.any_surprises_here();
        add_payload_type(
            &mut payload_stats,
            decoded.telegram().payload_type,
            checksum_ok,
            surprised,
        );

        let mut violations = Vec::new();
        if !checksum_ok {
            violations.push(ViolationKind::Checksum);
        }
        if surprised {
            violations.push(ViolationKind::MetadataSurprise);
        }
        compliance.add_telegram(&violations, &context);
        records.push(build_record(line, time, checksum_ok, &decoded));
    }

    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    report.capture_summary = Some(CaptureSummary {
        telegrams_total,
        telegrams_decoded: records.len() as u64,
        time_start: ts_to_rfc3339(first_ts),
        time_end: ts_to_rfc3339(last_ts),
    });
    report.generated_at = report
        .capture_summary
        .as_ref()
        .and_then(|summary| summary.time_end.clone().or(summary.time_start.clone()))
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());

    report.telegrams = records;
    report.payload_types = build_payload_type_summaries(payload_stats);
    report.compliance = compliance.build().into_iter().collect();
    Ok(report)
}

fn example_context(line: usize, time: Option<&str>) -> String {
    match time {
        Some(time) => format!("line {line} @ {time}"),
        None => format!("line {line}"),
    }
}

fn update_ts_bounds(first: &mut Option<f64>, last: &mut Option<f64>, ts: Option<f64>) {
    let ts = match ts {
        Some(ts) => ts,
        None => return,
    };
    match first {
        None => *first = Some(ts),
        Some(existing) => {
            if ts < *existing {
                *first = Some(ts);
            }
        }
    }
    match last {
        None => *last = Some(ts),
        Some(existing) => {
            if ts > *existing {
                *last = Some(ts);
            }
        }
    }
}

fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
