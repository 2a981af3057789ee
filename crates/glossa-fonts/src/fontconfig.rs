//! Private fontconfig configuration.
//!
//! The generated document restricts font lookup to the application's own directories, keeps
//! the fontconfig cache under the data directory, and installs the `sans-serif` fallback chain
//! plus a synthetic-bold rule for families that ship without a bold face.

use crate::{FALLBACK_FAMILIES, FontSettings, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;

/// Environment variable fontconfig reads its configuration file path from.
pub const FONTCONFIG_FILE_ENV: &str = "FONTCONFIG_FILE";

/// Seconds between fontconfig rescans of the configured directories.
pub const RESCAN_INTERVAL_SECS: u32 = 30;

static CONFIGURED: Mutex<Option<PathBuf>> = Mutex::new(None);

fn escape_xml_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn xml_path(path: &Path) -> String {
    escape_xml_text(&path.to_string_lossy())
}

/// Renders the fontconfig XML document for `settings`.
pub fn render_fontconfig(settings: &FontSettings) -> String {
    let mut dirs = String::new();
    for dir in settings.font_dirs() {
        dirs.push_str(&format!("    <dir>{}</dir>\n", xml_path(&dir)));
    }

    let mut prefer = String::new();
    for family in FALLBACK_FAMILIES {
        prefer.push_str(&format!(
            "            <family>{}</family>\n",
            escape_xml_text(family)
        ));
    }

    let mut defaults = String::new();
    for family in &FALLBACK_FAMILIES[..2] {
        defaults.push_str(&format!(
            r#"
    <alias>
        <family>{}</family>
        <default><family>sans-serif</family></default>
    </alias>
"#,
            escape_xml_text(family)
        ));
    }

    format!(
        r#"<?xml version="1.0"?>
<!DOCTYPE fontconfig SYSTEM "fonts.dtd">
<fontconfig>
    <cachedir>{cache_dir}</cachedir>
{dirs}    <config>
        <rescan>
            <int>{RESCAN_INTERVAL_SECS}</int>
        </rescan>
    </config>

    <alias>
        <family>sans-serif</family>
        <prefer>
{prefer}        </prefer>
    </alias>
{defaults}
    <!--
     Synthetic emboldening for fonts that do not have bold face available
    -->
    <match target="font">
        <test name="weight" compare="less_eq">
            <const>medium</const>
        </test>
        <test target="pattern" name="weight" compare="more_eq">
            <const>bold</const>
        </test>
        <edit name="embolden" mode="assign">
            <bool>true</bool>
        </edit>
        <edit name="weight" mode="assign">
            <const>bold</const>
        </edit>
    </match>
</fontconfig>
"#,
        cache_dir = xml_path(&settings.cache_dir()),
    )
}

/// Writes `fonts.conf` into the fonts data directory, creating the directory if needed.
///
/// The document is written to a temporary file in the same directory and renamed into place,
/// so readers never observe a partially written file.
pub fn write_fontconfig(settings: &FontSettings) -> Result<PathBuf> {
    let fonts_dir = settings.fonts_dir();
    std::fs::create_dir_all(&fonts_dir)?;

    let path = settings.config_path();
    let mut temp = NamedTempFile::new_in(&fonts_dir)?;
    temp.write_all(render_fontconfig(settings).as_bytes())?;
    temp.flush()?;
    temp.as_file_mut().sync_all()?;
    temp.into_temp_path().persist(&path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), "wrote fontconfig configuration");
    Ok(path)
}

/// Writes the fontconfig document and exports `FONTCONFIG_FILE`, once per process.
///
/// Later calls return the path established by the first successful call and touch neither the
/// filesystem nor the environment, even when given different settings. A failed call leaves the
/// process unconfigured.
pub fn ensure_configured(settings: &FontSettings) -> Result<PathBuf> {
    let mut state = CONFIGURED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(path) = state.as_ref() {
        return Ok(path.clone());
    }

    let path = std::path::absolute(write_fontconfig(settings)?)?;
    export_config_path(&path);
    tracing::debug!(path = %path.display(), "exported {FONTCONFIG_FILE_ENV}");

    *state = Some(path.clone());
    Ok(path)
}

#[allow(unsafe_code)]
fn export_config_path(path: &Path) {
    // SAFETY: only called from `ensure_configured` while holding `CONFIGURED`, during startup
    // and before font lookups run on other threads.
    unsafe { std::env::set_var(FONTCONFIG_FILE_ENV, path) }
}

/// The configuration path exported by [`ensure_configured`], if it has run.
pub fn configured_path() -> Option<PathBuf> {
    CONFIGURED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
