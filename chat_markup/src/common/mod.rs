// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod fixed_char_writer;
pub mod render_error;

// Re-export.
pub use fixed_char_writer::*;
pub use render_error::*;
