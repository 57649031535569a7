//! `.neo` header layout — the first 4096 bytes of every container.

use serde::{Deserialize, Serialize};

use crate::error::{NeoRomError, Result};
use crate::metadata::GameMetadata;

/// Tag identifying a `.neo` file: `NEO`.
pub const NEO_TAG: [u8; 3] = *b"NEO";

/// Current format version, stored in the byte after the tag.
pub const NEO_VERSION: u8 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 4096;

/// Shortest input [`parse_header`](crate::reader::parse_header) accepts.
pub const MIN_HEADER_LEN: usize = 91;

pub const SIZES_OFFSET: usize = 0x04;
pub const METADATA_OFFSET: usize = 0x1C;
pub const NAME_OFFSET: usize = 0x2C;
pub const MANUFACTURER_OFFSET: usize = 0x4D;
pub const FILLER_OFFSET: usize = 0x5E;

/// Width of the zero-padded name field.
pub const NAME_LEN: usize = 33;

/// Width of the zero-padded manufacturer field.
pub const MANUFACTURER_LEN: usize = 17;

/// Padded byte length of each ROM section, as recorded in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSizes {
    pub program: u32,
    pub sprite: u32,
    pub fix: u32,
    pub voice1: u32,
    pub voice2: u32,
    pub color_tile: u32,
}

impl SectionSizes {
    /// Values in header order.
    pub fn to_array(&self) -> [u32; 6] {
        [
            self.program,
            self.sprite,
            self.fix,
            self.voice1,
            self.voice2,
            self.color_tile,
        ]
    }

    pub fn from_array(values: [u32; 6]) -> Self {
        let [program, sprite, fix, voice1, voice2, color_tile] = values;
        Self {
            program,
            sprite,
            fix,
            voice1,
            voice2,
            color_tile,
        }
    }

    /// Sum of all section sizes, i.e. the container length minus the header.
    pub fn total(&self) -> u64 {
        self.to_array().iter().map(|&v| u64::from(v)).sum()
    }
}

/// The fixed-size header at the beginning of every `.neo` file.
///
/// Layout (4096 bytes, little-endian):
/// - `[0x00..0x03]` tag: `NEO`
/// - `[0x03]`       version: u8
/// - `[0x04..0x1C]` section sizes: 6 × u32 (P, S, M, V1, V2, C)
/// - `[0x1C..0x20]` year: u32
/// - `[0x20..0x24]` genre: u32
/// - `[0x24..0x28]` screenshot: u32
/// - `[0x28..0x2C]` NGH: u32
/// - `[0x2C..0x4D]` name: [u8; 33], zero-padded
/// - `[0x4D..0x5E]` manufacturer: [u8; 17], zero-padded
/// - `[0x5E..0x1000]` reserved: zero-filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u8,
    pub sizes: SectionSizes,
    pub year: u32,
    pub genre: u32,
    pub screenshot: u32,
    pub ngh: u32,
    pub name: [u8; NAME_LEN],
    pub manufacturer: [u8; MANUFACTURER_LEN],
}

impl ContainerHeader {
    /// Build the header for `metadata` and the given section sizes.
    ///
    /// Unparsable screenshot or NGH text is stored as 0. Name and
    /// manufacturer are stored one byte per character and truncated to
    /// their field width.
    pub fn new(metadata: &GameMetadata, sizes: SectionSizes) -> Self {
        Self {
            version: NEO_VERSION,
            sizes,
            year: metadata.year,
            genre: metadata.genre.code(),
            screenshot: metadata.screenshot_value(),
            ngh: metadata.ngh_value(),
            name: encode_field("name", &metadata.name),
            manufacturer: encode_field("manufacturer", &metadata.manufacturer),
        }
    }
}

/// Character written in place of anything outside Latin-1.
pub const SUBSTITUTE_BYTE: u8 = b'?';

/// Number of bytes `text` occupies in a header field: one per character.
pub fn encoded_len(text: &str) -> usize {
    text.chars().count()
}

/// True if every character of `text` fits in a single header byte.
pub fn is_latin1(text: &str) -> bool {
    text.chars().all(|c| u32::from(c) <= 0xFF)
}

/// Copy `text` into a zero-padded fixed-width field, one byte per character.
///
/// Characters above U+00FF are written as [`SUBSTITUTE_BYTE`].
fn encode_field<const N: usize>(field: &'static str, text: &str) -> [u8; N] {
    if encoded_len(text) > N {
        tracing::warn!(
            field,
            value = text,
            max_bytes = N,
            "Value too long for header field, truncating"
        );
    }
    if !is_latin1(text) {
        tracing::warn!(
            field,
            value = text,
            "Value has characters outside Latin-1, substituting '?'"
        );
    }

    let mut out = [0u8; N];
    for (slot, c) in out.iter_mut().zip(text.chars()) {
        *slot = u8::try_from(c).unwrap_or(SUBSTITUTE_BYTE);
    }
    out
}

/// Convert an in-memory section length to its header representation.
pub(crate) fn section_size(section: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        NeoRomError::InvalidInput(format!(
            "{section} section is {len} bytes, which does not fit the header size field"
        ))
    })
}
