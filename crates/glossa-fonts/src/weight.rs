use crate::{Error, Result};
use std::str::FromStr;

/// Symbolic font weights accepted by the text-fit checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Empty name: leave the weight to the backend.
    #[default]
    Default,
    Normal,
    Light,
    Bold,
}

impl FontWeight {
    pub const ALL: [FontWeight; 4] = [
        FontWeight::Normal,
        FontWeight::Light,
        FontWeight::Bold,
        FontWeight::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontWeight::Default => "",
            FontWeight::Normal => "normal",
            FontWeight::Light => "light",
            FontWeight::Bold => "bold",
        }
    }

    /// OpenType `usWeightClass` value, or `None` for the backend default.
    pub fn to_number(self) -> Option<u16> {
        match self {
            FontWeight::Default => None,
            FontWeight::Normal => Some(400),
            FontWeight::Light => Some(300),
            FontWeight::Bold => Some(700),
        }
    }
}

impl FromStr for FontWeight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FontWeight::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| Error::UnknownWeight {
                weight: s.to_string(),
            })
    }
}

impl std::fmt::Display for FontWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a symbolic weight name to the backend weight.
///
/// Only exact names are accepted; anything else is an [`Error::UnknownWeight`].
pub fn get_font_weight(name: &str) -> Result<Option<u16>> {
    Ok(name.parse::<FontWeight>()?.to_number())
}
