//! Family/style extraction for uploaded font files.

use crate::{Error, Result};
use serde::Serialize;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use tempfile::{Builder, NamedTempFile};
use ttf_parser::{Face, Language, name_id};

/// Family and style of a font face, for example `("Ubuntu", Some("Regular"))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FontName {
    pub family: String,
    pub style: Option<String>,
}

impl FontName {
    /// Typographic names (ids 16/17) win over the legacy family/subfamily pair (ids 1/2), so a
    /// `Ubuntu Light` face reports family `Ubuntu` and style `Light`.
    pub fn from_face(face: &Face<'_>) -> Result<Self> {
        let family = lookup_name(face, name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| lookup_name(face, name_id::FAMILY))
            .ok_or(Error::MissingFamilyName)?;
        let style = lookup_name(face, name_id::TYPOGRAPHIC_SUBFAMILY)
            .or_else(|| lookup_name(face, name_id::SUBFAMILY));
        Ok(Self { family, style })
    }

    /// Parses the first face in `data`.
    pub fn from_data(data: &[u8]) -> Result<Self> {
        let face = Face::parse(data, 0)?;
        Self::from_face(&face)
    }
}

/// Returns the decodable `name` record with the given id, preferring US English.
fn lookup_name(face: &Face<'_>, id: u16) -> Option<String> {
    let mut fallback = None;
    for name in face.names() {
        if name.name_id != id {
            continue;
        }
        let Some(value) = name.to_string() else {
            continue;
        };
        if name.language() == Language::English_UnitedStates {
            return Some(value);
        }
        fallback.get_or_insert(value);
    }
    fallback
}

/// A font upload together with its parsed name.
///
/// The name is parsed on first access and kept for as long as the holder lives, so repeated
/// lookups on the same upload never re-read the stream.
#[derive(Debug)]
pub struct FontFile<R> {
    inner: R,
    loaded: Option<FontName>,
    temp_dir: Option<PathBuf>,
}

impl<R: Read + Seek> FontFile<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            loaded: None,
            temp_dir: None,
        }
    }

    /// Creates the scratch copy of the font under `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Family and style of the font, parsed on first call.
    pub fn name(&mut self) -> Result<&FontName> {
        let name = match self.loaded.take() {
            Some(name) => name,
            None => self.load()?,
        };
        Ok(self.loaded.insert(name))
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn scratch_file(&self) -> Result<NamedTempFile> {
        let mut builder = Builder::new();
        builder.prefix("font-").suffix(".ttf");
        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(file)
    }

    // Parsing goes through a file on disk rather than the upload stream itself; the scratch
    // file is removed before returning on every path.
    fn load(&mut self) -> Result<FontName> {
        let mut temp = self.scratch_file()?;
        std::io::copy(&mut self.inner, temp.as_file_mut())?;
        self.inner.seek(SeekFrom::Start(0))?;
        temp.flush()?;

        let parsed = std::fs::read(temp.path())
            .map_err(Error::from)
            .and_then(|data| FontName::from_data(&data));
        temp.close()?;

        let name = parsed?;
        tracing::debug!(family = %name.family, style = ?name.style, "identified font");
        Ok(name)
    }
}
