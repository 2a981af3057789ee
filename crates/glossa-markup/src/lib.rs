#![forbid(unsafe_code)]

//! Mention rendering for Markdown text.
//!
//! `@handle` tokens that name a known user are replaced with bold profile links; everything
//! else is left as typed. The output is Markdown and is not escaped here.

pub mod error;
pub mod mention;
pub mod users;

pub use error::{Error, Result};
pub use mention::{
    MentionRenderer, Segment, mention_candidates, mention_ranges, mention_regex, split_mentions,
};
pub use users::{InMemoryUserDirectory, User, UserDirectory};

#[cfg(test)]
mod tests;
