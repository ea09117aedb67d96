// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error types for rendering. For more information on the error handling approach, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)
//!
//! There are three kinds of failure in this crate, and only one of them is an error
//! value:
//!
//! | Failure                          | How it surfaces                              |
//! | -------------------------------- | -------------------------------------------- |
//! | Growth loop exceeds `max_size`   | [`RenderError::CapacityExceeded`]            |
//! | Index outside `[0, total_len)`   | [`None`] from [`crate::MarkupNode::try_get_char`] |
//! | Destination shorter than needed  | Panic (caller broke the [`crate::MarkupNode`] contract) |

use miette::Diagnostic;

/// Type alias to make it easy to work with [`RenderError`]. Since [`RenderError`]
/// implements [`Diagnostic`], it converts into a [`miette::Report`] with `?` in code
/// that returns [`miette::Result`].
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum RenderError {
    /// The growth loop reached the configured maximum and the value still did not fit.
    /// Output is never truncated, so there is nothing to fall back to.
    #[error(
        "Formatted value does not fit in {attempted} chars, and the max size is {max_size}"
    )]
    #[diagnostic(
        code(r3bl_chat_markup::buffer_alloc::capacity_exceeded),
        help("Raise `max_size` in the `BufferSettings` for this node kind")
    )]
    CapacityExceeded { attempted: usize, max_size: usize },

    #[error("Invalid buffer settings: {reason}")]
    #[diagnostic(code(r3bl_chat_markup::buffer_alloc::invalid_settings))]
    InvalidSettings { reason: String },

    #[error("Could not parse buffer settings")]
    #[diagnostic(
        code(r3bl_chat_markup::buffer_alloc::settings_parse),
        help("Settings are a JSON object with optional fields: growth_factor, \
              initial_size, max_size, stack_threshold, pool_threshold")
    )]
    SettingsParse(#[from] serde_json::Error),
}

impl RenderError {
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        RenderError::InvalidSettings {
            reason: reason.into(),
        }
    }
}
