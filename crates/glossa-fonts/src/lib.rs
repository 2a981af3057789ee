#![deny(unsafe_code)]

//! Font plumbing for text-fit checks.
//!
//! - [`fontconfig`]: generate a private fontconfig document and point the process at it
//! - [`weight`]: symbolic weight names (`"normal"`, `"light"`, `"bold"`, `""`)
//! - [`metrics`]: memoized "does this text fit" checks over a pluggable [`TextMeasurer`]
//! - [`identify`]: family/style extraction from uploaded font files
//! - [`checks`]: a startup diagnostic probing the measurement backend

pub mod checks;
pub mod config;
pub mod error;
pub mod face;
pub mod fontconfig;
pub mod identify;
pub mod metrics;
pub mod text;
pub mod weight;

pub use checks::{CheckLevel, CheckMessage, check_fonts};
pub use config::FontSettings;
pub use error::{Error, Result};
pub use face::{FontLibrary, FontTextMeasurer};
pub use fontconfig::{configured_path, ensure_configured, render_fontconfig, write_fontconfig};
pub use identify::{FontFile, FontName};
pub use metrics::{DEFAULT_CACHE_CAPACITY, MetricsChecker, RenderQuery};
pub use text::{
    DeterministicTextMeasurer, RenderResult, TextMeasurer, TextStyle, UnavailableTextMeasurer,
};
pub use weight::{FontWeight, get_font_weight};

/// Families tried, in order, for the generic `sans-serif` family and for any family that
/// is not installed.
pub const FALLBACK_FAMILIES: [&str; 4] = [
    "Source Sans 3",
    "DejaVu Sans",
    "Noto Sans",
    "Droid Sans Fallback",
];

#[cfg(test)]
mod tests;
