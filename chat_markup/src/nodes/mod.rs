// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod concat_node;
pub mod enclosed_node;
pub mod markup_node;
pub mod render;
pub mod text_node;
pub mod value_node;

// Re-export.
pub use concat_node::*;
pub use enclosed_node::*;
pub use markup_node::*;
pub use render::*;
pub use text_node::*;
pub use value_node::*;
