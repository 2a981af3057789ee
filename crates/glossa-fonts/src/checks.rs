//! Startup diagnostics for the font layer.

use crate::metrics::{MetricsChecker, RenderQuery};
use crate::text::TextStyle;
use serde::Serialize;

/// Identifier of the font rendering check.
pub const FONT_RENDERING_CHECK: &str = "weblate.C024";

/// Leading text of the [`FONT_RENDERING_CHECK`] message, followed by the failure cause.
pub const FONT_RENDERING_FAILURE: &str = "Failed to use Pango";

const PROBE_TEXT: &str = "Sample text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckMessage {
    pub id: &'static str,
    pub level: CheckLevel,
    pub message: String,
}

/// Probes the checker's measurement backend with a short `sans-serif` sample.
///
/// Reports nothing when the probe succeeds, and a single [`FONT_RENDERING_CHECK`] error
/// otherwise.
pub fn check_fonts(checker: &MetricsChecker) -> Vec<CheckMessage> {
    let probe = RenderQuery::new(TextStyle::default(), PROBE_TEXT);
    match checker.measure(&probe) {
        Ok(_) => Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "font rendering probe failed");
            vec![CheckMessage {
                id: FONT_RENDERING_CHECK,
                level: CheckLevel::Error,
                message: format!("{FONT_RENDERING_FAILURE}: {err}"),
            }]
        }
    }
}
