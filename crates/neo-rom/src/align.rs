//! Alignment helpers shared by every section builder.

/// Alignment of the program, sprite, fix and voice sections.
pub const SIXTY_FOUR_KB: usize = 64 * 1024;

/// Alignment of the color-tile section.
pub const TWO_FIFTY_SIX_KB: usize = 256 * 1024;

pub const ONE_MEG: usize = 0x10_0000;
pub const TWO_MEGS: usize = ONE_MEG * 2;

/// Byte appended by [`pad`].
pub const FILL_BYTE: u8 = 0xFF;

/// Smallest multiple of `boundary` that is `>= value`.
///
/// # Panics
///
/// Panics if `boundary` is zero.
pub fn round_up(value: usize, boundary: usize) -> usize {
    value.next_multiple_of(boundary)
}

/// Append [`FILL_BYTE`] to `data` until its length is a multiple of `boundary`.
pub fn pad(mut data: Vec<u8>, boundary: usize) -> Vec<u8> {
    let target = round_up(data.len(), boundary);
    data.resize(target, FILL_BYTE);
    data
}
