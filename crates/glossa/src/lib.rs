#![forbid(unsafe_code)]

//! `glossa` bundles the text utilities of a localization platform.
//!
//! - mention rendering (always available): `@handle` tokens become profile links
//! - font plumbing (feature `fonts`, on by default): fontconfig bootstrap, cached text-fit
//!   checks and font identification
//!
//! # Features
//!
//! - `fonts`: re-export `glossa-fonts` as [`fonts`]

pub use glossa_markup::*;

#[cfg(feature = "fonts")]
pub mod fonts {
    pub use glossa_fonts::*;

    use std::sync::Arc;

    /// Configures fontconfig for `settings` and returns a checker measuring with the fonts
    /// found in the configured directories.
    ///
    /// This is the usual startup sequence for a process that checks text fit against the
    /// bundled and uploaded fonts.
    pub fn init(settings: &FontSettings) -> Result<MetricsChecker> {
        ensure_configured(settings)?;
        let library = FontLibrary::from_settings(settings)?;
        Ok(MetricsChecker::new(Arc::new(FontTextMeasurer::new(library))))
    }
}
