//! Role-specific assembly of the ROM sections that follow the header.
//!
//! Most sections are a plain concatenation padded to 64 KiB. Three need
//! more work:
//!
//! - **Voice**: a game uses either one V bank or a V1/V2 pair. Both banks
//!   are always produced; the second is empty for single-bank games.
//! - **Color tile**: C ROMs come in pairs (C1/C2, C3/C4, ...) that the
//!   hardware reads alternately, so each pair is byte-interleaved.
//! - **Program**: a 2 MiB P ROM has its two 1 MiB banks swapped because the
//!   cartridge expects the second bank first.

use crate::aggregate;
use crate::align::{pad, ONE_MEG, SIXTY_FOUR_KB, TWO_FIFTY_SIX_KB, TWO_MEGS};
use crate::error::{NeoRomError, Result};
use crate::role::RomRole;
use crate::source::SourceFileSet;

/// The two voice banks, each already padded to 64 KiB.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceBanks {
    pub bank1: Vec<u8>,
    /// Empty for games using the single-bank layout.
    pub bank2: Vec<u8>,
}

impl VoiceBanks {
    pub fn is_dual_bank(&self) -> bool {
        !self.bank2.is_empty()
    }
}

/// Concatenate `role` and pad to 64 KiB. Used for sprite and fix ROMs.
pub fn simple_section(files: &SourceFileSet, role: RomRole) -> Vec<u8> {
    pad(
        aggregate::concat(files, role, role.number_included()),
        SIXTY_FOUR_KB,
    )
}

/// Build both voice banks.
///
/// If any file is a V2 ROM the game uses the V1/V2 layout; otherwise all V
/// ROMs go to bank 1 and bank 2 stays empty.
pub fn voice_section(files: &SourceFileSet) -> VoiceBanks {
    if aggregate::has_any(files, RomRole::Voice2) {
        tracing::debug!("Using dual-bank voice layout");
        VoiceBanks {
            bank1: pad(aggregate::concat(files, RomRole::Voice1, false), SIXTY_FOUR_KB),
            bank2: pad(aggregate::concat(files, RomRole::Voice2, false), SIXTY_FOUR_KB),
        }
    } else {
        VoiceBanks {
            bank1: pad(aggregate::concat(files, RomRole::Voice, false), SIXTY_FOUR_KB),
            bank2: Vec::new(),
        }
    }
}

/// Build the color-tile section from the C ROM pairs.
///
/// Pairs are discovered from C1 upwards and discovery stops at the first pair
/// whose odd ROM is missing, so a gap ends the section.
pub fn color_tile_section(files: &SourceFileSet) -> Vec<u8> {
    let mut out = Vec::new();

    for odd_index in (1..=7u8).step_by(2) {
        let odd = concat_color_tile(files, odd_index);
        if odd.is_empty() {
            break;
        }
        let even = concat_color_tile(files, odd_index + 1);

        tracing::debug!(
            odd_chip = odd_index,
            odd_size = odd.len(),
            even_size = even.len(),
            "Interleaving color-tile pair"
        );

        let mut pair = odd;
        pair.extend_from_slice(&even);
        out.extend_from_slice(&interleave(&pair));
    }

    pad(out, TWO_FIFTY_SIX_KB)
}

fn concat_color_tile(files: &SourceFileSet, n: u8) -> Vec<u8> {
    match RomRole::color_tile(n) {
        Some(role) => aggregate::concat(files, role, true),
        None => Vec::new(),
    }
}

/// Interleave the two halves of `data` one byte at a time.
///
/// Output is `first[0], second[0], first[1], second[1], ...`. When `data`
/// has odd length its last byte stays at the end.
pub fn interleave(data: &[u8]) -> Vec<u8> {
    let half = data.len() / 2;
    let (first, rest) = data.split_at(half);
    let (second, tail) = rest.split_at(half);

    let mut out = Vec::with_capacity(data.len());
    for (&a, &b) in first.iter().zip(second) {
        out.push(a);
        out.push(b);
    }
    out.extend_from_slice(tail);
    out
}

/// Split interleaved data back into its two halves.
///
/// Inverse of [`interleave`] for even-length input.
pub fn deinterleave(data: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let pairs = data.chunks_exact(2);
    let tail = pairs.remainder();
    let (first, mut second): (Vec<u8>, Vec<u8>) = pairs.map(|p| (p[0], p[1])).unzip();
    second.extend_from_slice(tail);
    (first, second)
}

/// Build the program section, swapping banks when it is exactly 2 MiB.
///
/// # Errors
///
/// Propagates [`swap_banks`] failures; these cannot occur for well-formed
/// input since the swap is only attempted on 2 MiB buffers.
pub fn program_section(files: &SourceFileSet) -> Result<Vec<u8>> {
    let mut data = aggregate::concat(files, RomRole::Program, false);

    if data.len() == TWO_MEGS {
        tracing::debug!("Swapping P ROM banks");
        data = swap_banks(&data)?;
    }

    Ok(pad(data, SIXTY_FOUR_KB))
}

/// Swap the two 1 MiB halves of a 2 MiB program image.
///
/// # Errors
///
/// Returns [`NeoRomError::InvalidInput`] if `data` is not exactly 2 MiB.
pub fn swap_banks(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() != TWO_MEGS {
        return Err(NeoRomError::InvalidInput(format!(
            "bank swap needs exactly {TWO_MEGS} bytes, got {}",
            data.len()
        )));
    }

    let (first, second) = data.split_at(ONE_MEG);
    let mut out = Vec::with_capacity(TWO_MEGS);
    out.extend_from_slice(second);
    out.extend_from_slice(first);
    Ok(out)
}
