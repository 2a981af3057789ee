//! Greedy word wrapping on top of a [`TextMeasurer`].

use super::{TextMeasurer, TextStyle};
use crate::Result;

/// Splits a line into words and single-space tokens, preserving order.
pub fn split_line_to_words(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for ch in line.chars() {
        if ch == ' ' {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            out.push(" ".to_string());
        } else {
            cur.push(ch);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Splits on explicit line breaks (`\n`, tolerating `\r\n`).
pub fn split_hard_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Wraps `text` into lines no wider than `max_width_px`, as measured by `measurer`.
///
/// Words are appended while the trimmed candidate fits. A word that does not fit on an empty
/// line is broken by characters. Without a usable width only hard line breaks apply.
pub fn wrap_text_lines<M: TextMeasurer + ?Sized>(
    text: &str,
    measurer: &M,
    style: &TextStyle,
    max_width_px: Option<f64>,
) -> Result<Vec<String>> {
    let max_width_px = max_width_px.filter(|w| w.is_finite() && *w > 0.0);

    let mut out: Vec<String> = Vec::new();
    for line in split_hard_lines(text) {
        match max_width_px {
            Some(w) => out.extend(wrap_line(line, measurer, style, w)?),
            None => out.push(line.to_string()),
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    Ok(out)
}

/// Greedy fill of one hard line.
///
/// Spaces are kept between words but never start a line, and trailing spaces are dropped. A
/// word wider than `max_width_px` on its own is cut into the longest prefixes that fit, at
/// least one character each.
fn wrap_line<M: TextMeasurer + ?Sized>(
    line: &str,
    measurer: &M,
    style: &TextStyle,
    max_width_px: f64,
) -> Result<Vec<String>> {
    let fits = |s: &str| -> Result<bool> { Ok(measurer.line_width(s, style)? <= max_width_px) };

    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in split_line_to_words(line) {
        if word == " " {
            if !cur.is_empty() {
                cur.push(' ');
            }
            continue;
        }

        let candidate = format!("{cur}{word}");
        if fits(candidate.as_str())? {
            cur = candidate;
            continue;
        }
        let full = cur.trim_end();
        if !full.is_empty() {
            lines.push(full.to_string());
        }
        cur.clear();

        let mut rest = word.as_str();
        while !fits(rest)? {
            let mut cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
            for (idx, ch) in rest.char_indices().skip(1) {
                let end = idx + ch.len_utf8();
                if !fits(&rest[..end])? {
                    break;
                }
                cut = end;
            }
            lines.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }
        cur.push_str(rest);
    }

    let last = cur.trim_end();
    if !last.is_empty() || lines.is_empty() {
        lines.push(last.to_string());
    }
    Ok(lines)
}
