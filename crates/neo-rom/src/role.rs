//! ROM roles and the file-name classifier.
//!
//! Loose ROM dumps carry their role in the file name. Two naming conventions
//! are recognised:
//!
//! - `<anything><role><n>.<role><n>`, e.g. `089-c1.c1` or `019-v11.v11`
//! - `<anything><role><n>.rom` / `.bin`, e.g. `kof94_p1.rom`
//!
//! Matching is case-insensitive and looks only at the name, never at the
//! file content.

use serde::{Deserialize, Serialize};

/// The functional category of a ROM chip dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RomRole {
    /// P ROM: 68000 program code.
    Program,
    /// S ROM: fix-layer graphics.
    Sprite,
    /// M ROM: Z80 sound driver.
    Fix,
    /// V ROM, single-bank layout.
    Voice,
    /// V1 ROM, first bank of the dual-bank layout.
    Voice1,
    /// V2 ROM, second bank of the dual-bank layout.
    Voice2,
    /// C ROM `n`. Only `1..=8` name a chip; build values through
    /// [`RomRole::color_tile`]. Other numbers are never matched by
    /// [`matches`].
    ColorTile(u8),
}

/// Extensions that carry no role information of their own.
const GENERIC_EXTENSIONS: [&str; 2] = ["rom", "bin"];

impl RomRole {
    /// Every role, in header order.
    pub const ALL: [RomRole; 14] = [
        RomRole::Program,
        RomRole::Sprite,
        RomRole::Fix,
        RomRole::Voice,
        RomRole::Voice1,
        RomRole::Voice2,
        RomRole::ColorTile(1),
        RomRole::ColorTile(2),
        RomRole::ColorTile(3),
        RomRole::ColorTile(4),
        RomRole::ColorTile(5),
        RomRole::ColorTile(6),
        RomRole::ColorTile(7),
        RomRole::ColorTile(8),
    ];

    /// Build the color-tile role `n`, if `n` is in `1..=8`.
    pub fn color_tile(n: u8) -> Option<Self> {
        (1..=8).contains(&n).then_some(Self::ColorTile(n))
    }

    /// The lower-case token that names this role in file names.
    pub fn token(&self) -> &'static str {
        match self {
            RomRole::Program => "p",
            RomRole::Sprite => "s",
            RomRole::Fix => "m",
            RomRole::Voice => "v",
            RomRole::Voice1 => "v1",
            RomRole::Voice2 => "v2",
            RomRole::ColorTile(1) => "c1",
            RomRole::ColorTile(2) => "c2",
            RomRole::ColorTile(3) => "c3",
            RomRole::ColorTile(4) => "c4",
            RomRole::ColorTile(5) => "c5",
            RomRole::ColorTile(6) => "c6",
            RomRole::ColorTile(7) => "c7",
            RomRole::ColorTile(8) => "c8",
            RomRole::ColorTile(_) => "c",
        }
    }

    /// Parse a role token such as `"p"` or `"c3"` (case-insensitive).
    pub fn from_token(token: &str) -> Option<Self> {
        let lower = token.to_ascii_lowercase();
        Self::ALL.into_iter().find(|role| role.token() == lower)
    }

    /// False for a color-tile role outside `1..=8`.
    pub fn is_valid(&self) -> bool {
        match self {
            RomRole::ColorTile(n) => (1..=8).contains(n),
            _ => true,
        }
    }

    /// Whether the chip number is part of the token for this role.
    ///
    /// Color-tile roles must tell `c1` from `c2`, so their digit is matched
    /// as part of the token instead of as a free wildcard.
    pub fn number_included(&self) -> bool {
        matches!(self, RomRole::ColorTile(_))
    }
}

/// Decide whether `file_name` belongs to `role`.
///
/// With `number_included == false` the role token must be followed by one
/// digit and at most one more character (`p1`, `v11`). With
/// `number_included == true` the token already names the chip and may only be
/// followed by at most one character (`c1`, `c1a`).
pub fn matches(file_name: &str, role: RomRole, number_included: bool) -> bool {
    if !role.is_valid() {
        return false;
    }
    let lower = file_name.to_lowercase();
    let Some((stem, extension)) = lower.rsplit_once('.') else {
        return false;
    };

    let token = role.token();
    let pattern = RolePattern {
        token,
        number_included,
    };

    let extension_matches =
        GENERIC_EXTENSIONS.contains(&extension) || pattern.is_exactly(extension);

    extension_matches && pattern.ends(stem)
}

/// Return the first role in [`RomRole::ALL`] that `file_name` matches, using
/// each role's default [`RomRole::number_included`].
pub fn classify(file_name: &str) -> Option<RomRole> {
    RomRole::ALL
        .into_iter()
        .find(|role| matches(file_name, *role, role.number_included()))
}

/// `<token>[digit]<any char>?`, matched against the end of a string.
struct RolePattern<'a> {
    token: &'a str,
    number_included: bool,
}

impl RolePattern<'_> {
    /// True if the whole of `s` is one instance of the pattern.
    fn is_exactly(&self, s: &str) -> bool {
        s.strip_prefix(self.token)
            .is_some_and(|rest| self.matches_suffix(rest))
    }

    /// True if `s` ends with an instance of the pattern.
    fn ends(&self, s: &str) -> bool {
        // The tail after the token is at most two characters long.
        s.char_indices()
            .rev()
            .take(3)
            .map(|(i, _)| i)
            .chain(std::iter::once(s.len()))
            .any(|cut| {
                s[..cut].ends_with(self.token) && self.matches_suffix(&s[cut..])
            })
    }

    /// The part after the token: optional digit, then at most one character.
    fn matches_suffix(&self, rest: &str) -> bool {
        let mut chars = rest.chars();
        if !self.number_included {
            match chars.next() {
                Some(c) if c.is_ascii_digit() => {}
                _ => return false,
            }
        }
        chars.next();
        chars.next().is_none()
    }
}
