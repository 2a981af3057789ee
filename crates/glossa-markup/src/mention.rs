use crate::{Result, User, UserDirectory};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;
use std::sync::OnceLock;

/// `@` followed by letters, digits, `_`, `.`, `@`, `+` or `-`.
///
/// Matches are the longest possible runs; [`mention_ranges`] trims them back to a word
/// boundary.
pub fn mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@[\p{L}\p{N}_.@+-]+").expect("valid regex"))
}

/// Letters, digits and `_`. Combining marks and other connector punctuation are not word
/// characters.
fn is_word_char(ch: char) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[\p{L}\p{N}_]$").expect("valid regex"));
    re.is_match(ch.encode_utf8(&mut [0u8; 4]))
}

fn is_boundary(text: &str, at: usize) -> bool {
    let before = text[..at].chars().next_back().is_some_and(is_word_char);
    let after = text[at..].chars().next().is_some_and(is_word_char);
    before != after
}

/// Byte ranges of the mention tokens in `text`, including the leading `@`.
///
/// A token ends at the last word boundary of its run. A run without such a boundary is not a
/// mention, and scanning resumes right after its `@`.
pub fn mention_ranges(text: &str) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(m) = mention_regex().find_at(text, pos) {
        let handle = &text[m.start() + 1..m.end()];
        let end = handle
            .char_indices()
            .rev()
            .map(|(idx, ch)| m.start() + 1 + idx + ch.len_utf8())
            .find(|&end| is_boundary(text, end));
        match end {
            Some(end) => {
                out.push(m.start()..end);
                pos = end;
            }
            None => pos = m.start() + 1,
        }
    }
    out
}

/// A piece of text produced by [`split_mentions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// A mention token including its leading `@`.
    Mention(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(s) | Segment::Mention(s) => s,
        }
    }
}

/// Splits `text` into text and mention segments; joining them yields `text` again.
pub fn split_mentions(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0usize;
    for range in mention_ranges(text) {
        if range.start > last {
            out.push(Segment::Text(&text[last..range.start]));
        }
        last = range.end;
        out.push(Segment::Mention(&text[range]));
    }
    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }
    out
}

/// Usernames mentioned in `text`, without the leading `@`.
pub fn mention_candidates(text: &str) -> BTreeSet<&str> {
    mention_ranges(text)
        .into_iter()
        .map(|range| &text[range.start + 1..range.end])
        .collect()
}

/// Turns `@handle` mentions of known users into profile links.
#[derive(Debug, Clone)]
pub struct MentionRenderer<D> {
    directory: D,
}

impl<D: UserDirectory> MentionRenderer<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Users mentioned in `text`, fetched with a single directory lookup.
    ///
    /// Text without mentions never reaches the directory.
    pub fn resolve(&self, text: &str) -> Result<Vec<User>> {
        let candidates = mention_candidates(text);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.directory.find_by_usernames(&candidates)?;
        tracing::debug!(
            candidates = candidates.len(),
            found = users.len(),
            "resolved mentions"
        );
        Ok(users)
    }

    /// Replaces mentions of known users with `**[@handle](<profile> "<name>")**`.
    ///
    /// Handles match usernames case-insensitively while the link text keeps the casing the
    /// author typed. Unknown handles and all other text are copied verbatim. Nothing is escaped.
    pub fn render(&self, text: &str) -> Result<String> {
        let users: HashMap<String, User> = self
            .resolve(text)?
            .into_iter()
            .map(|user| (user.username.to_lowercase(), user))
            .collect();
        if users.is_empty() {
            return Ok(text.to_string());
        }

        let mut out = String::with_capacity(text.len());
        for segment in split_mentions(text) {
            let Segment::Mention(token) = segment else {
                out.push_str(segment.as_str());
                continue;
            };
            match users.get(&token[1..].to_lowercase()) {
                Some(user) => out.push_str(&format!(
                    "**[{token}]({} \"{}\")**",
                    user.profile_url(),
                    user.visible_name()
                )),
                None => out.push_str(token),
            }
        }
        Ok(out)
    }
}
