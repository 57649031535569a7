//! `.neo` header reader — recovers section sizes and game metadata.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use neo_rom::read_header;
//!
//! let header = read_header(Path::new("kof94.neo")).unwrap();
//! println!("{} ({})", header.metadata.name, header.metadata.year);
//! ```

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::{NeoRomError, Result};
use crate::header::{SectionSizes, HEADER_SIZE, MANUFACTURER_LEN, MIN_HEADER_LEN, NAME_LEN, NEO_TAG, NEO_VERSION};
use crate::metadata::{render_ngh, Genre};

/// Metadata recovered from a container header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMetadata {
    pub name: String,
    pub manufacturer: String,
    pub year: u32,
    /// Unknown genre codes are reported as [`Genre::Other`].
    pub genre: Genre,
    pub screenshot: u32,
    /// NGH digits as originally typed, `None` when the field is zero.
    pub ngh: Option<String>,
}

/// A parsed container header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedHeader {
    pub version: u8,
    pub sizes: SectionSizes,
    pub metadata: HeaderMetadata,
}

/// Parse the header at the start of `bytes`.
///
/// Only the first [`MIN_HEADER_LEN`] bytes are required. The manufacturer
/// field is read as far as the input reaches, up to its full width.
///
/// # Errors
///
/// - [`NeoRomError::TruncatedInput`] if `bytes` is shorter than [`MIN_HEADER_LEN`].
/// - [`NeoRomError::InvalidTag`] if the data does not start with `NEO`.
/// - [`NeoRomError::UnsupportedVersion`] for versions newer than this crate writes.
///
/// The tag and version checks are stricter than a plain header dump, which
/// would decode any 91 bytes. Non-`.neo` input is rejected here instead of
/// being reported as a garbled header.
pub fn parse_header(bytes: &[u8]) -> Result<ParsedHeader> {
    if bytes.len() < MIN_HEADER_LEN {
        return Err(NeoRomError::TruncatedInput {
            needed: MIN_HEADER_LEN,
            got: bytes.len(),
        });
    }

    let mut reader = Cursor::new(bytes);

    let mut tag = [0u8; 3];
    reader.read_exact(&mut tag)?;
    if tag != NEO_TAG {
        return Err(NeoRomError::InvalidTag(tag));
    }

    let version = reader.read_u8()?;
    if version > NEO_VERSION {
        return Err(NeoRomError::UnsupportedVersion(version));
    }

    let mut sizes = [0u32; 6];
    reader.read_u32_into::<LittleEndian>(&mut sizes)?;
    let sizes = SectionSizes::from_array(sizes);

    let year = reader.read_u32::<LittleEndian>()?;
    let genre_code = reader.read_u32::<LittleEndian>()?;
    let screenshot = reader.read_u32::<LittleEndian>()?;
    let ngh = reader.read_u32::<LittleEndian>()?;

    let mut name = [0u8; NAME_LEN];
    reader.read_exact(&mut name)?;

    // A minimal 91-byte header stops partway through this field.
    let mut manufacturer = Vec::with_capacity(MANUFACTURER_LEN);
    reader
        .by_ref()
        .take(MANUFACTURER_LEN as u64)
        .read_to_end(&mut manufacturer)?;

    let genre = Genre::from_code(genre_code).unwrap_or_else(|| {
        tracing::debug!(genre_code, "Unknown genre code, reporting Other");
        Genre::Other
    });

    let metadata = HeaderMetadata {
        name: decode_field(&name),
        manufacturer: decode_field(&manufacturer),
        year,
        genre,
        screenshot,
        ngh: render_ngh(ngh),
    };

    tracing::debug!(
        version,
        name = %metadata.name,
        program = sizes.program,
        color_tile = sizes.color_tile,
        "Parsed NEO header"
    );

    Ok(ParsedHeader {
        version,
        sizes,
        metadata,
    })
}

/// Read and parse the header of the `.neo` file at `path`.
///
/// # Errors
///
/// Returns [`NeoRomError::Io`] if the file cannot be read, or any error from
/// [`parse_header`].
pub fn read_header(path: &Path) -> Result<ParsedHeader> {
    tracing::info!("Reading NEO header: {}", path.display());

    let mut buf = Vec::with_capacity(HEADER_SIZE);
    File::open(path)?
        .take(HEADER_SIZE as u64)
        .read_to_end(&mut buf)?;
    parse_header(&buf)
}

/// Map each byte to one Latin-1 character; zero bytes contribute nothing.
fn decode_field(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}
