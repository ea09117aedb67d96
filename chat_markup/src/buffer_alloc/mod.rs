// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod buffer_settings;
pub mod buffer_tier;
pub mod char_buffer_pool;
pub mod growth_loop;
pub mod scratch_processor;

// Re-export.
pub use buffer_settings::*;
pub use buffer_tier::*;
pub use char_buffer_pool::*;
pub use growth_loop::*;
pub use scratch_processor::*;
