use std::collections::BTreeMap;

use crate::PayloadTypeSummary;
use crate::protocols::decoded::classify;
use crate::protocols::names::payload_type_label;

#[derive(Debug, Default, Clone)]
pub(crate) struct PayloadTypeStats {
    pub count: u64,
    pub checksum_failures: u64,
    pub surprises: u64,
}

pub(crate) fn add_payload_type(
    stats: &mut BTreeMap<u8, PayloadTypeStats>,
    code: u8,
    checksum_ok: bool,
    surprised: bool,
) {
    let entry = stats.entry(code).or_default();
    entry.count += 1;
    if !checksum_ok {
        entry.checksum_failures += 1;
    }
    if surprised {
        entry.surprises += 1;
    }
}

/// Summaries ascending by code.
pub(crate) fn build_payload_type_summaries(
    stats: BTreeMap<u8, PayloadTypeStats>,
) -> Vec<PayloadTypeSummary> {
    stats
        .into_iter()
        .map(|(code, stats)| PayloadTypeSummary {
            code,
            name: payload_type_label(code).to_string(),
            kind: classify(code),
            count: stats.count,
            checksum_failures: stats.checksum_failures,
            surprises: stats.surprises,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{add_payload_type, build_payload_type_summaries};
    use crate::TelegramKind;

    #[test]
    fn summaries_are_sorted_by_code_and_labelled() {
        let mut stats = BTreeMap::new();
        add_payload_type(&mut stats, 0x87, true, false);
        add_payload_type(&mut stats, 0x0B, true, true);
        add_payload_type(&mut stats, 0x0B, false, false);
        add_payload_type(&mut stats, 0xEE, true, false);

        let summaries = build_payload_type_summaries(stats);
        let codes: Vec<u8> = summaries.iter().map(|s| s.code).collect();
        assert_eq!(codes, vec![0x0B, 0x87, 0xEE]);

        let metadata = &summaries[0];
        assert_eq!(metadata.name, "METADATA");
        assert_eq!(metadata.kind, TelegramKind::Metadata);
        assert_eq!(metadata.count, 2);
        assert_eq!(metadata.checksum_failures, 1);
        assert_eq!(metadata.surprises, 1);

        assert_eq!(summaries[2].name, "???");
        assert_eq!(summaries[2].kind, TelegramKind::Unknown);
    }
}
