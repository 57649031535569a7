//! # neo-rom
//!
//! Builds `.neo` cartridge containers from loose arcade ROM dumps, and reads
//! their headers back.
//!
//! ## Format Overview
//!
//! A `.neo` file consists of:
//! - **Header** (4096 bytes): `NEO` tag, version, section sizes, year, genre,
//!   screenshot, NGH, name and manufacturer
//! - **Sections**: P, S, M, V1, V2 and C ROM data, each padded with `0xFF`
//!   to a 64 KiB (or 256 KiB for C) boundary
//!
//! ROM files are assigned to sections by name (`089-p1.p1`, `kof94_c3.rom`,
//! ...). C ROM pairs are byte-interleaved and 2 MiB P ROMs have their banks
//! swapped on the way in.
//!
//! ## Example
//! ```rust,no_run
//! use std::path::Path;
//! use neo_rom::{build_container, parse_header, GameMetadata, SourceFileSet};
//!
//! let files = SourceFileSet::from_dir(Path::new("roms/nam1975")).unwrap();
//! let neo = build_container(&GameMetadata::new("NAM-1975", 1990), &files).unwrap();
//!
//! let header = parse_header(&neo).unwrap();
//! println!("{:?}", header.sizes);
//! ```

pub mod aggregate;
pub mod align;
pub mod error;
pub mod header;
pub mod metadata;
pub mod reader;
pub mod role;
pub mod section;
pub mod source;
pub mod writer;

pub use error::NeoRomError;
pub use header::*;
pub use metadata::{GameMetadata, Genre};
pub use reader::{parse_header, read_header, HeaderMetadata, ParsedHeader};
pub use role::RomRole;
pub use source::SourceFileSet;
pub use writer::{build_container, NeoBuilder, NeoContainer};
