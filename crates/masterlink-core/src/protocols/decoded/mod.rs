//! Typed decoding of telegram payloads.
//!
//! [`classify`] maps a payload-type code onto exactly one [`TelegramKind`];
//! [`decode_telegram`] builds the matching [`DecodedTelegram`] variant. The
//! mapping is total: codes without a dedicated decoder become
//! [`DecodedTelegram::Unknown`], which keeps the raw payload for hex output.
//!
//! Variants interpret payload bytes leniently. Unexpected patterns yield an
//! `unknown` meaning or a surprise flag rather than an error, because the
//! payload layouts were inferred from captures and are known to be partial.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::names::{self, PLACEHOLDER, payload_type};
use super::telegram::Telegram;

pub mod audio_bus;
pub mod display_data;
pub mod goto_source;
pub mod master_present;
pub mod metadata;
pub mod status_info;
pub mod track_info;
pub mod unknown;

pub use audio_bus::{AudioBus, AudioBusMeaning};
pub use display_data::DisplayData;
pub use goto_source::{GotoSource, GotoSourceMeaning};
pub use master_present::MasterPresent;
pub use metadata::{Metadata, Surprise};
pub use status_info::StatusInfo;
pub use track_info::TrackInfo;
pub use unknown::Unknown;

/// Decoder selected for a payload-type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelegramKind {
    MasterPresent,
    DisplayData,
    AudioBus,
    Metadata,
    TrackInfo,
    GotoSource,
    StatusInfo,
    Unknown,
}

impl TelegramKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelegramKind::MasterPresent => "master_present",
            TelegramKind::DisplayData => "display_data",
            TelegramKind::AudioBus => "audio_bus",
            TelegramKind::Metadata => "metadata",
            TelegramKind::TrackInfo => "track_info",
            TelegramKind::GotoSource => "goto_source",
            TelegramKind::StatusInfo => "status_info",
            TelegramKind::Unknown => "unknown",
        }
    }
}

/// Map a payload-type code to its decoder.
///
/// # Examples
/// ```
/// use masterlink_core::{TelegramKind, classify};
///
/// assert_eq!(classify(0x45), TelegramKind::GotoSource);
/// assert_eq!(classify(0x99), TelegramKind::Unknown);
/// ```
pub fn classify(code: u8) -> TelegramKind {
    match code {
        payload_type::MASTER_PRESENT => TelegramKind::MasterPresent,
        payload_type::DISPLAY_DATA => TelegramKind::DisplayData,
        payload_type::AUDIO_BUS => TelegramKind::AudioBus,
        payload_type::METADATA => TelegramKind::Metadata,
        payload_type::TRACK_INFO => TelegramKind::TrackInfo,
        payload_type::GOTO_SOURCE => TelegramKind::GotoSource,
        payload_type::STATUS_INFO => TelegramKind::StatusInfo,
        _ => TelegramKind::Unknown,
    }
}

/// A telegram interpreted according to its payload type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedTelegram {
    MasterPresent(MasterPresent),
    DisplayData(DisplayData),
    AudioBus(AudioBus),
    Metadata(Metadata),
    TrackInfo(TrackInfo),
    GotoSource(GotoSource),
    StatusInfo(StatusInfo),
    Unknown(Unknown),
}

/// Decode a telegram into the variant selected by [`classify`].
///
/// # Examples
/// ```
/// use masterlink_core::{DecodedTelegram, Telegram, decode_telegram};
/// use masterlink_core::names::{payload_type, source, telegram_type};
///
/// let telegram = Telegram::new(
///     telegram_type::COMMAND,
///     payload_type::GOTO_SOURCE,
///     0x01,
///     vec![0x02, source::DVD, 0x00, 0x00],
/// );
/// match decode_telegram(telegram) {
///     DecodedTelegram::GotoSource(goto) => assert_eq!(goto.requested_source, Some(source::DVD)),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn decode_telegram(telegram: Telegram) -> DecodedTelegram {
    let kind = classify(telegram.payload_type);
    trace!(
        payload_type = telegram.payload_type,
        kind = kind.as_str(),
        "classified telegram"
    );
    match kind {
        TelegramKind::MasterPresent => DecodedTelegram::MasterPresent(MasterPresent::decode(telegram)),
        TelegramKind::DisplayData => DecodedTelegram::DisplayData(DisplayData::decode(telegram)),
        TelegramKind::AudioBus => DecodedTelegram::AudioBus(AudioBus::decode(telegram)),
        TelegramKind::Metadata => DecodedTelegram::Metadata(Metadata::decode(telegram)),
        TelegramKind::TrackInfo => DecodedTelegram::TrackInfo(TrackInfo::decode(telegram)),
        TelegramKind::GotoSource => DecodedTelegram::GotoSource(GotoSource::decode(telegram)),
        TelegramKind::StatusInfo => DecodedTelegram::StatusInfo(StatusInfo::decode(telegram)),
        TelegramKind::Unknown => DecodedTelegram::Unknown(Unknown::decode(telegram)),
    }
}

impl DecodedTelegram {
    pub fn make(telegram: Telegram) -> Self {
        decode_telegram(telegram)
    }

    pub fn kind(&self) -> TelegramKind {
        match self {
            DecodedTelegram::MasterPresent(_) => TelegramKind::MasterPresent,
            DecodedTelegram::DisplayData(_) => TelegramKind::DisplayData,
            DecodedTelegram::AudioBus(_) => TelegramKind::AudioBus,
            DecodedTelegram::Metadata(_) => TelegramKind::Metadata,
            DecodedTelegram::TrackInfo(_) => TelegramKind::TrackInfo,
            DecodedTelegram::GotoSource(_) => TelegramKind::GotoSource,
            DecodedTelegram::StatusInfo(_) => TelegramKind::StatusInfo,
            DecodedTelegram::Unknown(_) => TelegramKind::Unknown,
        }
    }

    pub fn telegram(&self) -> &Telegram {
        match self {
            DecodedTelegram::MasterPresent(inner) => &inner.telegram,
            DecodedTelegram::DisplayData(inner) => &inner.telegram,
            DecodedTelegram::AudioBus(inner) => &inner.telegram,
            DecodedTelegram::Metadata(inner) => &inner.telegram,
            DecodedTelegram::TrackInfo(inner) => &inner.telegram,
            DecodedTelegram::GotoSource(inner) => &inner.telegram,
            DecodedTelegram::StatusInfo(inner) => &inner.telegram,
            DecodedTelegram::Unknown(inner) => &inner.telegram,
        }
    }

    /// True only for metadata telegrams that break an expected byte.
    pub fn any_surprises_here(&self) -> bool {
        match self {
            DecodedTelegram::Metadata(metadata) => metadata.any_surprises_here(),
            _ => false,
        }
    }

    /// Human-readable diagnostic line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DecodedTelegram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedTelegram::MasterPresent(inner) => fmt::Display::fmt(inner, f),
            DecodedTelegram::DisplayData(inner) => fmt::Display::fmt(inner, f),
            DecodedTelegram::AudioBus(inner) => fmt::Display::fmt(inner, f),
            DecodedTelegram::Metadata(inner) => fmt::Display::fmt(inner, f),
            DecodedTelegram::TrackInfo(inner) => fmt::Display::fmt(inner, f),
            DecodedTelegram::GotoSource(inner) => fmt::Display::fmt(inner, f),
            DecodedTelegram::StatusInfo(inner) => fmt::Display::fmt(inner, f),
            DecodedTelegram::Unknown(inner) => fmt::Display::fmt(inner, f),
        }
    }
}

fn code_label(label: &str, code: u8) -> String {
    if label == PLACEHOLDER {
        format!("{PLACEHOLDER}(0x{code:02X})")
    } else {
        label.to_string()
    }
}

fn endpoint_label(node: u8, source: u8) -> String {
    let node = code_label(names::node_label(node), node);
    if source == 0 {
        node
    } else {
        format!("{node}:{}", names::source_label(source))
    }
}

/// Common prefix of every rendering: payload type, telegram type, route.
pub(crate) fn write_header(f: &mut fmt::Formatter<'_>, telegram: &Telegram) -> fmt::Result {
    write!(
        f,
        "{} {} {} -> {}",
        code_label(names::payload_type_label(telegram.payload_type), telegram.payload_type),
        code_label(names::telegram_type_label(telegram.telegram_type), telegram.telegram_type),
        endpoint_label(telegram.src_node, telegram.src_src),
        endpoint_label(telegram.dest_node, telegram.dest_src),
    )
}

/// Optional source id rendered as its label.
pub(crate) fn source_field(source: Option<u8>) -> String {
    match source {
        Some(code) => code_label(&names::source_label(code), code),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodedTelegram, TelegramKind, classify, decode_telegram};
    use crate::protocols::names::{node, payload_type, source, telegram_type};
    use crate::protocols::telegram::Telegram;

    #[test]
    fn classify_is_total() {
        let expected = [
            (payload_type::MASTER_PRESENT, TelegramKind::MasterPresent),
            (payload_type::DISPLAY_DATA, TelegramKind::DisplayData),
            (payload_type::AUDIO_BUS, TelegramKind::AudioBus),
            (payload_type::METADATA, TelegramKind::Metadata),
            (payload_type::TRACK_INFO, TelegramKind::TrackInfo),
            (payload_type::GOTO_SOURCE, TelegramKind::GotoSource),
            (payload_type::STATUS_INFO, TelegramKind::StatusInfo),
        ];
        for code in 0..=u8::MAX {
            let want = expected
                .iter()
                .find(|(known, _)| *known == code)
                .map(|(_, kind)| *kind)
                .unwrap_or(TelegramKind::Unknown);
            assert_eq!(classify(code), want, "code 0x{code:02X}");
        }
    }

    #[test]
    fn decoded_kind_matches_classifier() {
        for code in 0..=u8::MAX {
            let telegram = Telegram::new(telegram_type::STATUS, code, 0x01, vec![0x00; 8]);
            let decoded = decode_telegram(telegram.clone());
            assert_eq!(decoded.kind(), classify(code));
            assert_eq!(decoded.telegram(), &telegram);
        }
    }

    #[test]
    fn header_renders_names_and_route() {
        let telegram = Telegram::new(
            telegram_type::COMMAND,
            payload_type::GOTO_SOURCE,
            0x01,
            vec![0x02, source::CD, 0x00, 0x00],
        )
        .addressed(node::V_MASTER, 0x00, node::A_MASTER, source::CD);
        let text = DecodedTelegram::make(telegram).render();
        assert!(text.starts_with("GOTO_SOURCE COMMAND A_MASTER:CD -> V_MASTER"));
    }

    #[test]
    fn header_marks_unknown_codes() {
        let telegram = Telegram::new(0x77, 0x99, 0x01, vec![]).addressed(0x42, 0x00, 0x43, 0x00);
        let text = decode_telegram(telegram).render();
        assert!(text.starts_with("???(0x99) ???(0x77) ???(0x43) -> ???(0x42)"));
    }

    #[test]
    fn only_metadata_reports_surprises() {
        let telegram = Telegram::new(telegram_type::STATUS, payload_type::TRACK_INFO, 0x05, vec![0xFF]);
        assert!(!decode_telegram(telegram).any_surprises_here());
        let telegram = Telegram::new(telegram_type::INFO, payload_type::METADATA, 0x03, vec![0xFF]);
        assert!(decode_telegram(telegram).any_surprises_here());
    }
}
