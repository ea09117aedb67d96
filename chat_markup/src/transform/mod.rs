// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Wrappers whose rendering inserts content mid-stream: line markers after every line
//! separator, or escapes in front of special chars. None of them ever builds an expanded
//! intermediate string.
//!
//! - [`expansion_rule`]: how one source char expands into one or more output chars.
//! - [`two_phase_sizing`]: the count pass, which finds the exact output size.
//! - [`stream_transform`]: the transform pass, which writes into an exactly-sized
//!   destination.
//! - [`virtual_cursor`]: single-char lookup and sequential iteration over the expanded
//!   output without materializing it.
//! - [`expanded_node`] and [`line_prefixed_node`]: the nodes built out of the above.

// Attach sources.
pub mod expanded_node;
pub mod expansion_rule;
pub mod line_prefixed_node;
pub mod stream_transform;
pub mod two_phase_sizing;
pub mod virtual_cursor;

// Re-export.
pub use expanded_node::*;
pub use expansion_rule::*;
pub use line_prefixed_node::*;
pub use stream_transform::*;
pub use two_phase_sizing::*;
pub use virtual_cursor::*;
