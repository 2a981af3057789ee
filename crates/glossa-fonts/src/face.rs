//! Font library and the glyph-advance measurement backend built on it.

use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, FALLBACK_FAMILIES, FontName, FontSettings, FontWeight, Result};
use std::path::Path;
use std::sync::Arc;
use ttf_parser::{Face, GlyphId};

/// Faces at or below this weight get synthetic emboldening when bold is requested.
const EMBOLDEN_MAX_WEIGHT: u16 = 500;

#[derive(Debug, Clone)]
struct LoadedFace {
    name: FontName,
    weight: u16,
    data: Arc<[u8]>,
}

/// In-memory set of parsed font faces, looked up by family name.
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    faces: Vec<LoadedFace>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every font found in the configured font directories. Missing directories are
    /// skipped.
    pub fn from_settings(settings: &FontSettings) -> Result<Self> {
        let mut library = Self::new();
        for dir in settings.font_dirs() {
            library.load_dir(&dir)?;
        }
        Ok(library)
    }

    /// Loads `.ttf`/`.otf` files directly inside `dir`; returns how many faces were added.
    ///
    /// Files that fail to parse are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "font directory does not exist");
            return Ok(0);
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_font = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf")
                });
            if is_font && path.is_file() {
                paths.push(path);
            }
        }
        // Directory iteration order is platform dependent.
        paths.sort();

        let mut added = 0usize;
        for path in paths {
            let data = std::fs::read(&path)?;
            match self.add_font_data(data) {
                Ok(name) => {
                    tracing::debug!(path = %path.display(), family = %name.family, "loaded font");
                    added += 1;
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unusable font");
                }
            }
        }
        Ok(added)
    }

    /// Parses and registers the first face in `data`.
    pub fn add_font_data(&mut self, data: impl Into<Arc<[u8]>>) -> Result<&FontName> {
        let data: Arc<[u8]> = data.into();
        let (name, weight) = {
            let face = Face::parse(&data, 0)?;
            (FontName::from_face(&face)?, face.weight().to_number())
        };
        self.faces.push(LoadedFace { name, weight, data });
        let loaded = &self.faces[self.faces.len() - 1];
        Ok(&loaded.name)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &FontName> {
        self.faces.iter().map(|f| &f.name)
    }

    /// Resolves a family list to a face.
    ///
    /// Families are tried in order; `sans-serif` expands to the fallback chain, which is also
    /// appended after the requested families. Within a family the face with the closest weight
    /// wins.
    fn select(&self, font: &str, weight: FontWeight) -> Result<&LoadedFace> {
        let wanted = weight.to_number().unwrap_or(400);

        let mut families: Vec<&str> = Vec::new();
        for family in font.split(',') {
            let family = family.trim().trim_matches(|c| c == '"' || c == '\'');
            if family.is_empty() {
                continue;
            }
            if family.eq_ignore_ascii_case("sans-serif") {
                families.extend(FALLBACK_FAMILIES);
            } else {
                families.push(family);
            }
        }
        families.extend(FALLBACK_FAMILIES);

        for family in families {
            let best = self
                .faces
                .iter()
                .filter(|f| f.name.family.eq_ignore_ascii_case(family))
                .min_by_key(|f| f.weight.abs_diff(wanted));
            if let Some(face) = best {
                return Ok(face);
            }
        }

        Err(Error::FontNotFound {
            family: font.to_string(),
        })
    }
}

/// Measures text with glyph advances from a [`FontLibrary`].
///
/// Advances come from the `hmtx` table without shaping; characters missing from the font use
/// the `.notdef` advance. When bold is requested and only a regular face exists, each glyph is
/// widened by `size / 24`, matching the synthetic emboldening rule of the generated fontconfig
/// document.
#[derive(Debug, Clone)]
pub struct FontTextMeasurer {
    library: Arc<FontLibrary>,
}

impl FontTextMeasurer {
    pub fn new(library: impl Into<Arc<FontLibrary>>) -> Self {
        Self {
            library: library.into(),
        }
    }

    pub fn library(&self) -> &FontLibrary {
        &self.library
    }
}

impl TextMeasurer for FontTextMeasurer {
    fn line_width(&self, line: &str, style: &TextStyle) -> Result<f64> {
        let loaded = self.library.select(&style.font, style.weight)?;
        let face = Face::parse(&loaded.data, 0)?;

        let size = style.size_px();
        let scale = size / f64::from(face.units_per_em());
        let embolden = style.weight == FontWeight::Bold && loaded.weight <= EMBOLDEN_MAX_WEIGHT;
        let per_char = f64::from(style.spacing) + if embolden { size / 24.0 } else { 0.0 };

        let notdef = face.glyph_hor_advance(GlyphId(0)).unwrap_or(0);
        let mut width = 0.0;
        for ch in line.chars() {
            let advance = face
                .glyph_index(ch)
                .and_then(|g| face.glyph_hor_advance(g))
                .unwrap_or(notdef);
            width += f64::from(advance) * scale + per_char;
        }
        Ok(width.max(0.0))
    }

    fn line_height(&self, style: &TextStyle) -> Result<f64> {
        let loaded = self.library.select(&style.font, style.weight)?;
        let face = Face::parse(&loaded.data, 0)?;
        let units = i32::from(face.ascender()) - i32::from(face.descender())
            + i32::from(face.line_gap());
        Ok(f64::from(units) * style.size_px() / f64::from(face.units_per_em()))
    }
}
