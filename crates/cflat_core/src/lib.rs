//! cflat_core: Core utilities for the cflat front end.
//!
//! Provides string interning, source positions, arena allocation, and the
//! insertion-ordered map used by scope frames.

pub mod arena;
pub mod collections;
pub mod intern;
pub mod pos;

// Re-export commonly used types
pub use arena::AstArena;
pub use collections::OrderedMap;
pub use intern::{InternedString, StringInterner};
pub use pos::SourcePos;
