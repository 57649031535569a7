//! Game metadata stored in the container header.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NeoRomError, Result};

/// Genre codes understood by the cartridge menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u32)]
pub enum Genre {
    #[default]
    Other = 0,
    Action = 1,
    BeatEmUp = 2,
    Sports = 3,
    Driving = 4,
    Platformer = 5,
    Mahjong = 6,
    Shooter = 7,
    Quiz = 8,
    Fighting = 9,
    Puzzle = 10,
}

impl Genre {
    pub const ALL: [Genre; 11] = [
        Genre::Other,
        Genre::Action,
        Genre::BeatEmUp,
        Genre::Sports,
        Genre::Driving,
        Genre::Platformer,
        Genre::Mahjong,
        Genre::Shooter,
        Genre::Quiz,
        Genre::Fighting,
        Genre::Puzzle,
    ];

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Genre::Other => "Other",
            Genre::Action => "Action",
            Genre::BeatEmUp => "BeatEmUp",
            Genre::Sports => "Sports",
            Genre::Driving => "Driving",
            Genre::Platformer => "Platformer",
            Genre::Mahjong => "Mahjong",
            Genre::Shooter => "Shooter",
            Genre::Quiz => "Quiz",
            Genre::Fighting => "Fighting",
            Genre::Puzzle => "Puzzle",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a genre name is not in the genre table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGenre(pub String);

impl fmt::Display for UnknownGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Genre::ALL.iter().map(|g| g.name()).collect();
        write!(
            f,
            "unknown genre {:?}, must be one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownGenre {}

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

/// Caller-supplied description of the game being converted.
///
/// Screenshot and NGH are kept as the raw text the caller typed; they are
/// parsed leniently when the header is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Game name, at most [`NAME_LEN`](crate::header::NAME_LEN) bytes.
    pub name: String,
    /// Manufacturer, at most [`MANUFACTURER_LEN`](crate::header::MANUFACTURER_LEN) bytes.
    pub manufacturer: String,
    pub year: u32,
    pub genre: Genre,
    /// Base-10 screenshot index; absent or invalid means 0.
    pub screenshot: Option<String>,
    /// NGH number as printed on the board, e.g. `"95"`.
    pub ngh: Option<String>,
}

impl GameMetadata {
    /// Create metadata with the default manufacturer (`SNK`) and genre.
    pub fn new(name: impl Into<String>, year: u32) -> Self {
        Self {
            name: name.into(),
            manufacturer: "SNK".to_string(),
            year,
            genre: Genre::Other,
            screenshot: None,
            ngh: None,
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_screenshot(mut self, screenshot: impl Into<String>) -> Self {
        self.screenshot = Some(screenshot.into());
        self
    }

    pub fn with_ngh(mut self, ngh: impl Into<String>) -> Self {
        self.ngh = Some(ngh.into());
        self
    }

    /// Screenshot index to store, 0 when absent or unparsable.
    pub fn screenshot_value(&self) -> u32 {
        lenient(self.screenshot.as_deref(), parse_screenshot)
    }

    /// NGH value to store, 0 when absent or unparsable.
    pub fn ngh_value(&self) -> u32 {
        lenient(self.ngh.as_deref(), parse_ngh)
    }
}

/// Parse a screenshot index as a base-10 integer.
pub fn parse_screenshot(text: &str) -> Result<u32> {
    parse_field("screenshot", text, 10)
}

/// Parse an NGH number.
///
/// The cartridge tooling stores the decimal NGH digits as if they were hex,
/// so `"95"` becomes `0x95`.
pub fn parse_ngh(text: &str) -> Result<u32> {
    parse_field("NGH", text, 16)
}

/// Parse a release year as a base-10 integer.
pub fn parse_year(text: &str) -> Result<u32> {
    parse_field("year", text, 10)
}

/// Render a stored NGH value back to the digits it was parsed from.
///
/// Zero means "no NGH" and renders as `None`.
pub fn render_ngh(value: u32) -> Option<String> {
    (value != 0).then(|| format!("{value:x}"))
}

fn parse_field(field: &'static str, text: &str, radix: u32) -> Result<u32> {
    u32::from_str_radix(text.trim(), radix).map_err(|_| NeoRomError::MalformedMetadataField {
        field,
        value: text.to_string(),
    })
}

/// Apply a field parser, degrading to 0 with a warning on bad input.
pub fn lenient(text: Option<&str>, parse: fn(&str) -> Result<u32>) -> u32 {
    let Some(text) = text else {
        return 0;
    };
    match parse(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring metadata value, storing 0");
            0
        }
    }
}
