//! Text editing primitives for the editor panels.
//!
//! Rope-backed storage with grapheme-aware cursor mapping and a
//! viewport for virtual scrolling.

mod buffer;
mod cursor;
mod viewport;

pub use buffer::TextBuffer;
pub use cursor::Cursor;
pub use viewport::Viewport;
