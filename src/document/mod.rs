//! Markdown preview rendering.
//!
//! A [`Document`] is a read-only projection of raw markdown text into
//! styled, wrapped lines ready for the terminal. It is always derived
//! from the text buffer, never edited directly.

mod parser;
mod types;

pub use types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};
