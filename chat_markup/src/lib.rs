// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_chat_markup
//!
//! Render deeply nested chat markup (bold, inline code, spoilers, block quotes, escaped
//! text, formatted numbers and timestamps) into one contiguous `[char]` buffer, with as
//! few intermediate allocations as possible.
//!
//! ## How it fits together
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │ nodes      MarkupNode: total_length() → copy_to(&mut [char])          │
//! │            TextNode, ValueNode, Concat, Enclosed                      │
//! ├───────────────────────────────────────────────────────────────────────┤
//! │ transform  count pass → exactly sized destination → transform pass    │
//! │            Expanded, ExpandedValue, LinePrefixed, VirtualCursor       │
//! ├───────────────────────────────────────────────────────────────────────┤
//! │ buffer_alloc  growth loop over stack → pooled → heap scratch buffers  │
//! ├───────────────────────────────────────────────────────────────────────┤
//! │ formattable   Formattable: try_format(&mut [char]) for values         │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! 1. Every node knows its exact rendered length before anything is written. Lengths
//!    are computed when a node is built, and cached.
//! 2. The caller allocates the destination once, with exactly that length, and the
//!    whole tree copies itself into it in one pass. See [`render_to_string`].
//! 3. Values that don't know their own length up front (a float with a locale, a date
//!    with a pattern) are formatted into scratch buffers that grow geometrically, and
//!    come from the stack, a shared [`CharBufferPool`], or the heap depending on size.
//!    See [`BufferAllocator`] and [`BufferSettings`].
//! 4. Wrappers that inject chars mid-stream (a `> ` after every line break, a `\` in
//!    front of every `*`) never build an expanded intermediate string.
//!
//! ```
//! use r3bl_chat_markup::{MarkupNode, PrefixEscape, TextNode, ValueNode,
//!                        render_to_string};
//!
//! let message = TextNode::new("user_1")
//!     .expanded(PrefixEscape::backslash(&['_', '*']))
//!     .enclosed("**", "**")
//!     .then(TextNode::new(" scored\n"))
//!     .then(ValueNode::try_new(1_500_u32).unwrap().enclosed("`", "`"))
//!     .line_prefixed("> ");
//!
//! let rendered = render_to_string(&message).unwrap();
//! assert_eq!(rendered, "> **user\\_1** scored\n> `1500`");
//! assert_eq!(message.total_length(), rendered.chars().count());
//! ```
//!
//! ## Logging
//!
//! This crate emits [`tracing`] events and never prints. Install a subscriber to see
//! growth loop attempts (`trace`), pool reuse (`debug`), and capacity failures (`warn`).

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod buffer_alloc;
pub mod common;
pub mod formattable;
pub mod nodes;
pub mod transform;

// Re-export.
pub use buffer_alloc::*;
pub use common::*;
pub use formattable::*;
pub use nodes::*;
pub use transform::*;
