//! The raw-text buffer behind the editor surface.
//!
//! Provides a rope-backed buffer with cursor management, dirty tracking,
//! and a revision counter that the update loop uses to keep the rendered
//! preview in sync with every mutation.

mod text;

pub use text::{Cursor, Direction, TextBuffer};
