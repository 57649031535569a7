//! `.neo` writer — assembles ROM sections and metadata into a container.
//!
//! Create a [`NeoBuilder`] from the game's metadata, then call
//! [`NeoBuilder::build`] to get the container bytes in memory, or
//! [`NeoBuilder::finalize`] to write them to disk.
//!
//! # Binary Layout
//!
//! - **Header** (4096 bytes): tag, version, section sizes, metadata, strings
//! - **Sections**, each padded to its own boundary, in this order:
//!   P (64 KiB), S (64 KiB), M (64 KiB), V1 then V2 (64 KiB each), C (256 KiB)
//!
//! # Example
//!
//! ```rust,no_run
//! use neo_rom::{GameMetadata, Genre, NeoBuilder, SourceFileSet};
//! use std::path::Path;
//!
//! let files = SourceFileSet::from_dir(Path::new("roms/kof94")).unwrap();
//! let metadata = GameMetadata::new("King of Fighters 94", 1994)
//!     .with_genre(Genre::Fighting)
//!     .with_ngh("55");
//!
//! NeoBuilder::new(metadata)
//!     .finalize(&files, Path::new("kof94.neo"))
//!     .unwrap();
//! ```

use std::io::Write;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Result;
use crate::header::{section_size, ContainerHeader, SectionSizes, FILLER_OFFSET, HEADER_SIZE, NEO_TAG};
use crate::metadata::GameMetadata;
use crate::role::RomRole;
use crate::section;
use crate::source::SourceFileSet;

/// A fully assembled container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeoContainer {
    /// The padded section sizes written to the header.
    pub sizes: SectionSizes,
    /// Header followed by every section.
    pub bytes: Vec<u8>,
}

/// Builder for `.neo` containers.
#[derive(Debug, Clone)]
pub struct NeoBuilder {
    metadata: GameMetadata,
}

impl NeoBuilder {
    pub fn new(metadata: GameMetadata) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &GameMetadata {
        &self.metadata
    }

    /// Assemble the container in memory.
    ///
    /// An empty file set produces a header-only container.
    ///
    /// # Errors
    ///
    /// Returns [`NeoRomError::InvalidInput`](crate::NeoRomError::InvalidInput)
    /// if a section violates an internal size precondition.
    pub fn build(&self, files: &SourceFileSet) -> Result<NeoContainer> {
        tracing::info!(name = %self.metadata.name, files = files.len(), "Building NEO container");

        let program = section::program_section(files)?;
        let sprite = section::simple_section(files, RomRole::Sprite);
        let fix = section::simple_section(files, RomRole::Fix);
        let voice = section::voice_section(files);
        let color_tile = section::color_tile_section(files);

        let sizes = SectionSizes {
            program: section_size("program", program.len())?,
            sprite: section_size("sprite", sprite.len())?,
            fix: section_size("fix", fix.len())?,
            voice1: section_size("voice bank 1", voice.bank1.len())?,
            voice2: section_size("voice bank 2", voice.bank2.len())?,
            color_tile: section_size("color tile", color_tile.len())?,
        };

        tracing::debug!(
            program = sizes.program,
            sprite = sizes.sprite,
            fix = sizes.fix,
            voice1 = sizes.voice1,
            voice2 = sizes.voice2,
            color_tile = sizes.color_tile,
            "Section sizes"
        );

        let header = ContainerHeader::new(&self.metadata, sizes);

        let mut bytes = Vec::with_capacity(HEADER_SIZE + sizes.total() as usize);
        Self::write_header(&mut bytes, &header)?;
        for part in [
            &program,
            &sprite,
            &fix,
            &voice.bank1,
            &voice.bank2,
            &color_tile,
        ] {
            bytes.extend_from_slice(part);
        }

        tracing::info!(size = bytes.len(), "NEO container built");

        Ok(NeoContainer { sizes, bytes })
    }

    /// Build the container and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NeoRomError::Io`](crate::NeoRomError::Io) if the file
    /// cannot be written, or any error from [`build`](Self::build).
    pub fn finalize(&self, files: &SourceFileSet, path: &Path) -> Result<NeoContainer> {
        let container = self.build(files)?;
        std::fs::write(path, &container.bytes)?;
        tracing::info!(path = %path.display(), size = container.bytes.len(), "NEO file written");
        Ok(container)
    }

    /// Write the 4096-byte header to the given writer.
    fn write_header<W: Write>(writer: &mut W, header: &ContainerHeader) -> Result<()> {
        // [0x00..0x04]: Tag and version
        writer.write_all(&NEO_TAG)?;
        writer.write_u8(header.version)?;
        // [0x04..0x1C]: P, S, M, V1, V2, C sizes
        for size in header.sizes.to_array() {
            writer.write_u32::<LittleEndian>(size)?;
        }
        // [0x1C..0x2C]: Year, genre, screenshot, NGH
        writer.write_u32::<LittleEndian>(header.year)?;
        writer.write_u32::<LittleEndian>(header.genre)?;
        writer.write_u32::<LittleEndian>(header.screenshot)?;
        writer.write_u32::<LittleEndian>(header.ngh)?;
        // [0x2C..0x5E]: Name and manufacturer
        writer.write_all(&header.name)?;
        writer.write_all(&header.manufacturer)?;
        // [0x5E..0x1000]: Reserved
        writer.write_all(&[0u8; HEADER_SIZE - FILLER_OFFSET])?;
        Ok(())
    }
}

/// Build a container from `metadata` and `files` and return its bytes.
pub fn build_container(metadata: &GameMetadata, files: &SourceFileSet) -> Result<Vec<u8>> {
    NeoBuilder::new(metadata.clone())
        .build(files)
        .map(|container| container.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{FILL_BYTE, ONE_MEG, SIXTY_FOUR_KB, TWO_FIFTY_SIX_KB};
    use crate::header::{MANUFACTURER_OFFSET, NAME_OFFSET};
    use crate::metadata::Genre;
    use std::io::{Cursor, Read};

    use byteorder::ReadBytesExt;

    fn test_metadata() -> GameMetadata {
        GameMetadata::new("TestGame", 2020).with_genre(Genre::Fighting)
    }

    #[test]
    fn test_empty_file_set_is_header_only() {
        let container = NeoBuilder::new(test_metadata())
            .build(&SourceFileSet::new())
            .unwrap();

        assert_eq!(container.bytes.len(), HEADER_SIZE);
        assert_eq!(container.sizes, SectionSizes::default());
        assert_eq!(&container.bytes[..4], b"NEO\x01");
        assert!(container.bytes[FILLER_OFFSET..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_header_round_trip() {
        let meta = test_metadata().with_screenshot("2").with_ngh("95");
        let files: SourceFileSet = [("089-p1.p1", vec![0x11u8; 100])].into_iter().collect();
        let bytes = build_container(&meta, &files).unwrap();

        let mut cursor = Cursor::new(&bytes);
        let mut tag = [0u8; 3];
        cursor.read_exact(&mut tag).unwrap();
        assert_eq!(tag, NEO_TAG);
        assert_eq!(cursor.read_u8().unwrap(), 1);

        let program = cursor.read_u32::<LittleEndian>().unwrap();
        assert_eq!(program as usize, SIXTY_FOUR_KB);
        for _ in 0..5 {
            assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 0);
        }

        assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 2020);
        assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 9);
        assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 2);
        assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 0x95);
        assert_eq!(cursor.position() as usize, NAME_OFFSET);

        assert_eq!(&bytes[NAME_OFFSET..NAME_OFFSET + 9], b"TestGame\0");
        assert_eq!(&bytes[MANUFACTURER_OFFSET..MANUFACTURER_OFFSET + 4], b"SNK\0");
    }

    #[test]
    fn test_section_order_and_alignment() {
        let files: SourceFileSet = [
            ("g-p1.p1", vec![0x01u8; 10]),
            ("g-s1.s1", vec![0x02u8; 10]),
            ("g-m1.m1", vec![0x03u8; 10]),
            ("g-v11.v11", vec![0x04u8; 10]),
            ("g-v21.v21", vec![0x05u8; 10]),
            ("g-c1.c1", vec![0x06u8; 10]),
            ("g-c2.c2", vec![0x07u8; 10]),
        ]
        .into_iter()
        .collect();

        let container = NeoBuilder::new(test_metadata()).build(&files).unwrap();
        let sizes = container.sizes;

        for size in &sizes.to_array()[..5] {
            assert_eq!(*size as usize, SIXTY_FOUR_KB);
        }
        assert_eq!(sizes.color_tile as usize, TWO_FIFTY_SIX_KB);
        assert_eq!(
            container.bytes.len() as u64,
            HEADER_SIZE as u64 + sizes.total()
        );

        // First byte of each section, in header order.
        let mut offset = HEADER_SIZE;
        for (size, expected) in sizes.to_array().iter().zip([1u8, 2, 3, 4, 5, 6]) {
            assert_eq!(container.bytes[offset], expected);
            assert_eq!(container.bytes[offset + 9], if expected == 6 { 7 } else { expected });
            offset += *size as usize;
        }
        assert_eq!(container.bytes[HEADER_SIZE + 10], FILL_BYTE);
    }

    #[test]
    fn test_one_meg_program() {
        let files: SourceFileSet = [("089-p1.p1", vec![0xABu8; ONE_MEG])].into_iter().collect();
        let bytes = build_container(&test_metadata(), &files).unwrap();

        assert_eq!(bytes.len(), HEADER_SIZE + ONE_MEG);
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 1_048_576);
    }

    #[test]
    fn test_finalize_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.neo");
        let files: SourceFileSet = [("089-s1.s1", vec![0x5Au8; 16])].into_iter().collect();

        let container = NeoBuilder::new(test_metadata())
            .finalize(&files, &path)
            .unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, container.bytes);
        assert_eq!(written.len(), HEADER_SIZE + SIXTY_FOUR_KB);
    }

    #[test]
    fn test_finalize_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("game.neo");
        let result = NeoBuilder::new(test_metadata()).finalize(&SourceFileSet::new(), &path);
        assert!(matches!(result, Err(crate::NeoRomError::Io(_))));
    }
}
