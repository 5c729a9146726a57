//! Reference tables for Masterlink byte codes.
//!
//! Every lookup is total: codes without a known name return `None` from the
//! `*_name` functions and render as [`PLACEHOLDER`] through the `*_label`
//! helpers. Several numeric codes are shared between namespaces (telegram
//! type `REQUEST` and payload type `METADATA` are both 0x0B) and between
//! sources (0x15 is both `V_MEM` and `V_TAPE`). A code only has meaning
//! together with the table it is looked up in, and source aliases are all
//! kept rather than collapsed to one name.

/// Rendered for codes absent from a table.
pub const PLACEHOLDER: &str = "???";

/// Bus node addresses.
pub mod node {
    pub const ALL: u8 = 0x80;
    pub const ALL_LINK: u8 = 0x83;
    pub const V_MASTER: u8 = 0xC0;
    pub const A_MASTER: u8 = 0xC1;
    pub const PC_1: u8 = 0xC2;
}

/// AV source ids. Aliased ids carry the same value on purpose.
pub mod source {
    pub const A_AUX: u8 = 0x97;
    pub const A_MEM: u8 = 0x79;
    pub const A_MEM2: u8 = 0x7A;
    pub const A_TAPE: u8 = 0x79;
    pub const CD: u8 = 0x8D;
    pub const DOORCAM: u8 = 0x3E;
    pub const DTV: u8 = 0x1F;
    pub const DTV2: u8 = 0x33;
    pub const DVD: u8 = 0x29;
    pub const DVD2: u8 = 0x16;
    pub const N_RADIO: u8 = 0xA1;
    pub const PC: u8 = 0x47;
    pub const PHONO: u8 = 0xA1;
    pub const RADIO: u8 = 0x6F;
    pub const SAT: u8 = 0x1F;
    pub const TV: u8 = 0x0B;
    pub const V_AUX: u8 = 0x33;
    pub const V_AUX2: u8 = 0x3E;
    pub const V_MEM: u8 = 0x15;
    pub const V_TAPE: u8 = 0x15;
    pub const V_TAPE2: u8 = 0x16;
}

/// Payload-type codes with a dedicated decoder.
pub mod payload_type {
    pub const MASTER_PRESENT: u8 = 0x04;
    pub const DISPLAY_DATA: u8 = 0x06;
    pub const AUDIO_BUS: u8 = 0x08;
    pub const METADATA: u8 = 0x0B;
    pub const TRACK_INFO: u8 = 0x44;
    pub const GOTO_SOURCE: u8 = 0x45;
    pub const STATUS_INFO: u8 = 0x87;
}

/// Telegram-type codes.
pub mod telegram_type {
    pub const COMMAND: u8 = 0x0A;
    pub const REQUEST: u8 = 0x0B;
    pub const STATUS: u8 = 0x14;
    pub const INFO: u8 = 0x2C;
    pub const TIME: u8 = 0x40;
    pub const CONFIG: u8 = 0x5E;
}

/// Metadata field types.
pub mod field_type {
    pub const GENRE: u8 = 0x01;
    pub const ALBUM: u8 = 0x02;
    pub const ARTIST: u8 = 0x03;
    pub const TRACK: u8 = 0x04;
}

pub fn node_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0x80 | 0x83 => "ALL",
        0xC0 => "V_MASTER",
        0xC1 => "A_MASTER",
        0xC2 => "PC_1",
        0x01 => "NODE_01",
        0x02 => "NODE_02",
        0x03 => "NODE_03",
        0x04 => "NODE_04",
        0x05 => "NODE_05",
        0x06 => "NODE_06",
        0x07 => "NODE_07",
        0x08 => "NODE_08",
        0x09 => "NODE_09",
        0x0A => "NODE_0A",
        0x0B => "NODE_0B",
        0x0C => "NODE_0C",
        0x0D => "NODE_0D",
        0x0E => "NODE_0E",
        0x0F => "NODE_0F",
        0x10 => "NODE_10",
        0x11 => "NODE_11",
        0x12 => "NODE_12",
        0x13 => "NODE_13",
        _ => return None,
    };
    Some(name)
}

/// Whether a node address is one of the broadcast addresses.
pub fn is_broadcast(code: u8) -> bool {
    matches!(code, node::ALL | node::ALL_LINK)
}

/// Every source name sharing a numeric id, primary name first.
///
/// # Examples
/// ```
/// use masterlink_core::names::{source, source_aliases};
///
/// assert_eq!(source_aliases(source::V_TAPE), &["V_MEM", "V_TAPE"]);
/// assert!(source_aliases(0x00).is_empty());
/// ```
pub fn source_aliases(code: u8) -> &'static [&'static str] {
    match code {
        0x0B => &["TV"],
        0x15 => &["V_MEM", "V_TAPE"],
        0x16 => &["DVD2", "V.TAPE2"],
        0x1F => &["SAT", "DTV"],
        0x29 => &["DVD"],
        0x33 => &["V_AUX", "DTV2"],
        0x3E => &["DOORCAM", "V.AUX2"],
        0x47 => &["PC"],
        0x6F => &["RADIO"],
        0x79 => &["A_MEM", "A_TAPE"],
        0x7A => &["A.MEM2"],
        0x8D => &["CD"],
        0x97 => &["A_AUX"],
        0xA1 => &["N_RADIO", "PHONO"],
        _ => &[],
    }
}

pub fn source_name(code: u8) -> Option<&'static str> {
    source_aliases(code).first().copied()
}

/// All aliases joined with `/`, or the placeholder.
pub fn source_label(code: u8) -> String {
    let aliases = source_aliases(code);
    if aliases.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        aliases.join("/")
    }
}

/// Resolve a source by name (any alias, case-insensitive).
pub fn source_by_name(name: &str) -> Option<u8> {
    (0..=u8::MAX).find(|code| {
        source_aliases(*code)
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

pub fn payload_type_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0x04 => "MASTER_PRESENT",
        0x05 => "???",
        0x06 => "DISPLAY_DATA",
        0x08 => "AUDIO_BUS",
        0x0B => "METADATA",
        0x0D => "BEO4_KEY",
        0x10 => "STANDBY",
        0x11 => "RELEASE",
        0x12 => "???",
        0x20 => "???",
        0x30 => "???",
        0x3C => "TIMER",
        0x40 => "CLOCK",
        0x44 => "TRACK_INFO",
        0x45 => "GOTO_SOURCE",
        0x5C => "???",
        0x6C => "DISTRIBUTION_REQUEST",
        0x82 => "TRACK_INFO_LONG",
        0x87 => "STATUS_INFO",
        0x94 => "DVD_STATUS_INFO",
        0x96 => "PC_PRESENT",
        _ => return None,
    };
    Some(name)
}

pub fn telegram_type_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0x0A => "COMMAND",
        0x0B => "REQUEST",
        0x14 => "STATUS",
        0x2C => "INFO",
        // Reported in the field but never captured so far.
        0x40 => "TIME",
        0x5E => "CONFIG",
        _ => return None,
    };
    Some(name)
}

pub fn field_type_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0x01 => "GENRE",
        0x02 => "ALBUM",
        0x03 => "ARTIST",
        0x04 => "TRACK",
        _ => return None,
    };
    Some(name)
}

pub fn node_label(code: u8) -> &'static str {
    node_name(code).unwrap_or(PLACEHOLDER)
}

pub fn payload_type_label(code: u8) -> &'static str {
    payload_type_name(code).unwrap_or(PLACEHOLDER)
}

pub fn telegram_type_label(code: u8) -> &'static str {
    telegram_type_name(code).unwrap_or(PLACEHOLDER)
}

pub fn field_type_label(code: u8) -> &'static str {
    field_type_name(code).unwrap_or(PLACEHOLDER)
}
