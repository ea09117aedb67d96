// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod chrono_impls;
pub mod format_spec;
pub mod formattable_api;
pub mod number_impls;
pub mod text_impls;

// Re-export.
pub use format_spec::*;
pub use formattable_api::*;
pub use number_impls::*;
