use crate::TelegramRecord;
use crate::protocols::decoded::DecodedTelegram;

pub(crate) fn build_record(
    line: usize,
    time: Option<String>,
    checksum_ok: bool,
    decoded: &DecodedTelegram,
) -> TelegramRecord {
    let telegram = decoded.telegram();
    let surprises = match decoded {
        DecodedTelegram::Metadata(metadata) => metadata.surprises(),
        _ => Vec::new(),
    };
    TelegramRecord {
        line,
        time,
        kind: decoded.kind(),
        payload_type: telegram.payload_type,
        telegram_type: telegram.telegram_type,
        src_node: telegram.src_node,
        src_src: telegram.src_src,
        dest_node: telegram.dest_node,
        dest_src: telegram.dest_src,
        checksum_ok,
        summary: decoded.render(),
        surprises,
    }
}

#[cfg(test)]
mod tests {
    use super::build_record;
    use crate::protocols::decoded::{GotoSource, decode_telegram};
    use crate::protocols::names::{payload_type, source, telegram_type};
    use crate::protocols::telegram::Telegram;
    use crate::TelegramKind;

    #[test]
    fn record_copies_codes_and_rendering() {
        let decoded = decode_telegram(GotoSource::request(source::CD));
        let record = build_record(12, None, true, &decoded);
        assert_eq!(record.line, 12);
        assert_eq!(record.kind, TelegramKind::GotoSource);
        assert_eq!(record.payload_type, payload_type::GOTO_SOURCE);
        assert_eq!(record.summary, decoded.render());
        assert!(record.surprises.is_empty());
    }

    #[test]
    fn metadata_record_lists_surprises() {
        let telegram = Telegram::new(
            telegram_type::INFO,
            payload_type::METADATA,
            0x03,
            vec![0x04, 0x00, 0x00, 0x02, source::CD, 0x00],
        );
        let record = build_record(1, None, true, &decode_telegram(telegram));
        assert_eq!(record.surprises.len(), 1);
        assert_eq!(record.surprises[0].offset, 3);
    }
}
