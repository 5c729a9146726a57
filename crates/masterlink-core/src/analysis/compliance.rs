use std::collections::BTreeMap;

use crate::protocols::telegram::TelegramError;
use crate::{ComplianceSummary, Violation};

const PROTOCOL: &str = "masterlink";
const MAX_EXAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ViolationKind {
    CaptureLine,
    TooShort,
    Framing,
    Checksum,
    MetadataSurprise,
}

impl ViolationKind {
    /// Violation for a telegram that failed to parse.
    pub(crate) fn from_structural(err: &TelegramError) -> Self {
        match err {
            TelegramError::InvalidFraming { .. } => ViolationKind::Framing,
            _ => ViolationKind::TooShort,
        }
    }

    fn id(self) -> &'static str {
        match self {
            ViolationKind::CaptureLine => "ML-CAPTURE-LINE",
            ViolationKind::TooShort => "ML-TOO-SHORT",
            ViolationKind::Framing => "ML-FRAMING",
            ViolationKind::Checksum => "ML-CHECKSUM",
            ViolationKind::MetadataSurprise => "ML-METADATA-SURPRISE",
        }
    }

    fn severity(self) -> &'static str {
        match self {
            ViolationKind::MetadataSurprise => "warning",
            _ => "error",
        }
    }

    fn message(self) -> &'static str {
        match self {
            ViolationKind::CaptureLine => "Capture line could not be read as telegram bytes",
            ViolationKind::TooShort => "Telegram shorter than its header or declared payload",
            ViolationKind::Framing => "Unexpected start marker or spare byte",
            ViolationKind::Checksum => "Checksum does not match telegram contents",
            ViolationKind::MetadataSurprise => "Metadata payload breaks an expected byte",
        }
    }
}

#[derive(Debug, Default)]
struct ViolationStats {
    count: u64,
    examples: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct ComplianceStats {
    telegrams: u64,
    violating: u64,
    violations: BTreeMap<ViolationKind, ViolationStats>,
}

impl ComplianceStats {
    /// Account for one telegram and the violations it raised.
    pub(crate) fn add_telegram(&mut self, violations: &[ViolationKind], context: &str) {
        self.telegrams += 1;
        if violations.is_empty() {
            return;
        }
        self.violating += 1;
        for kind in violations {
            let entry = self.violations.entry(*kind).or_default();
            entry.count += 1;
            if entry.examples.len() < MAX_EXAMPLES {
                entry.examples.push(context.to_string());
            }
        }
    }

    /// `None` when no telegram was seen.
    pub(crate) fn build(self) -> Option<ComplianceSummary> {
        if self.telegrams == 0 {
            return None;
        }
        let compliant = self.telegrams - self.violating;
        let compliance_percentage = compliant as f64 * 100.0 / self.telegrams as f64;

        let mut violations: Vec<Violation> = self
            .violations
            .into_iter()
            .map(|(kind, stats)| Violation {
                id: kind.id().to_string(),
                severity: kind.severity().to_string(),
                message: kind.message().to_string(),
                count: stats.count,
                examples: stats.examples,
            })
            .collect();
        violations.sort_by(|a, b| {
            severity_rank(&a.severity)
                .cmp(&severity_rank(&b.severity))
                .then_with(|| a.id.cmp(&b.id))
        });

        Some(ComplianceSummary {
            protocol: PROTOCOL.to_string(),
            compliance_percentage,
            violations,
        })
    }
}

fn severity_rank(severity: &str) -> u8 {
    match severity {
        "error" => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::{ComplianceStats, ViolationKind};
    use crate::protocols::telegram::TelegramError;

    #[test]
    fn empty_capture_has_no_summary() {
        assert!(ComplianceStats::default().build().is_none());
    }

    #[test]
    fn clean_capture_is_fully_compliant() {
        let mut stats = ComplianceStats::default();
        stats.add_telegram(&[], "line 1");
        stats.add_telegram(&[], "line 2");
        let summary = stats.build().unwrap();
        assert_eq!(summary.compliance_percentage, 100.0);
        assert!(summary.violations.is_empty());
    }

    #[test]
    fn errors_sort_before_warnings_and_examples_are_capped() {
        let mut stats = ComplianceStats::default();
        for line in 1..=5 {
            stats.add_telegram(&[ViolationKind::MetadataSurprise], &format!("line {line}"));
        }
        stats.add_telegram(&[ViolationKind::TooShort], "line 6");
        stats.add_telegram(&[ViolationKind::Checksum, ViolationKind::MetadataSurprise], "line 7");
        stats.add_telegram(&[], "line 8");

        let summary = stats.build().unwrap();
        let ids: Vec<&str> = summary.violations.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["ML-CHECKSUM", "ML-TOO-SHORT", "ML-METADATA-SURPRISE"]);
        let surprise = &summary.violations[2];
        assert_eq!(surprise.severity, "warning");
        assert_eq!(surprise.count, 6);
        assert_eq!(surprise.examples, vec!["line 1", "line 2", "line 3"]);
        assert_eq!(summary.compliance_percentage, 12.5);
    }

    #[test]
    fn unreadable_line_is_an_error() {
        let mut stats = ComplianceStats::default();
        stats.add_telegram(&[ViolationKind::CaptureLine], "line 3");
        stats.add_telegram(&[ViolationKind::Checksum], "line 4");

        let summary = stats.build().unwrap();
        let ids: Vec<&str> = summary.violations.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["ML-CAPTURE-LINE", "ML-CHECKSUM"]);
        assert_eq!(summary.violations[0].severity, "error");
        assert_eq!(summary.compliance_percentage, 0.0);
    }

    #[test]
    fn structural_errors_map_to_violations() {
        let short = TelegramError::TooShort {
            needed: 11,
            actual: 4,
        };
        let framing = TelegramError::InvalidFraming {
            offset: 2,
            expected: 0x01,
            actual: 0x07,
        };
        assert_eq!(ViolationKind::from_structural(&short), ViolationKind::TooShort);
        assert_eq!(ViolationKind::from_structural(&framing), ViolationKind::Framing);
    }
}
