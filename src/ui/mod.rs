//! Terminal UI components.
//!
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Colors for rendered markdown elements
//! - [`render`](self::render()): Frame rendering for both view modes

pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::{document_content_width, line_number_width, render};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;

#[cfg(test)]
mod tests;
