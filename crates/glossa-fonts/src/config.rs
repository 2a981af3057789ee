use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "GLOSSA_DATA_DIR";
pub const STATIC_ROOT_ENV: &str = "GLOSSA_STATIC_ROOT";

/// Locations the font layer reads from and writes to.
///
/// `data_dir` holds writable state (uploaded fonts, the generated fontconfig document and
/// the fontconfig cache); `static_root` is where bundled font packages are collected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FontSettings {
    pub data_dir: PathBuf,
    pub static_root: PathBuf,
}

impl FontSettings {
    pub fn new(data_dir: impl Into<PathBuf>, static_root: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            static_root: static_root.into(),
        }
    }

    /// Reads `GLOSSA_DATA_DIR` and `GLOSSA_STATIC_ROOT`.
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var_os(DATA_DIR_ENV).ok_or(Error::MissingSetting {
            name: DATA_DIR_ENV,
        })?;
        let static_root = std::env::var_os(STATIC_ROOT_ENV).ok_or(Error::MissingSetting {
            name: STATIC_ROOT_ENV,
        })?;
        Ok(Self::new(data_dir, static_root))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.data_dir.join("fonts")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache").join("fonts")
    }

    pub fn config_path(&self) -> PathBuf {
        self.fonts_dir().join("fonts.conf")
    }

    /// Font directories in lookup order: uploaded fonts first, then the bundled packages.
    pub fn font_dirs(&self) -> [PathBuf; 5] {
        let vendor = self.static_root.join("vendor");
        [
            self.fonts_dir(),
            vendor.join("font-source").join("TTF"),
            vendor.join("font-dejavu"),
            self.static_root.join("font-noto"),
            self.static_root.join("font-droid"),
        ]
    }
}
