// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Entry points for callers that just want the rendered text. Each one asks the node for
//! its length, allocates the output buffer exactly once, and copies into it.

use super::MarkupNode;
use crate::RenderResult;

/// Render `node` into a freshly allocated, exactly-sized `Vec<char>`.
///
/// # Errors
///
/// See [`MarkupNode::copy_to`].
pub fn render_to_chars(node: &impl MarkupNode) -> RenderResult<Vec<char>> {
    let total_length = node.total_length();
    let mut acc = vec!['\0'; total_length];
    let written = node.copy_to(&mut acc)?;
    debug_assert_eq!(written, total_length, "copy_to disagrees with total_length");
    Ok(acc)
}

/// Render `node` and append it to `acc`. `acc` grows at most once, by exactly the UTF-8
/// size of the rendered chars.
///
/// # Errors
///
/// See [`MarkupNode::copy_to`].
pub fn render_into(node: &impl MarkupNode, acc: &mut String) -> RenderResult<()> {
    let chars = render_to_chars(node)?;
    let byte_len = chars.iter().map(|it| it.len_utf8()).sum::<usize>();
    acc.reserve_exact(byte_len);
    acc.extend(chars);
    Ok(())
}

/// ```
/// use r3bl_chat_markup::{MarkupNode, TextNode, render_to_string};
///
/// let node = TextNode::new("hello").enclosed("**", "**");
/// assert_eq!(render_to_string(&node).unwrap(), "**hello**");
/// ```
///
/// # Errors
///
/// See [`MarkupNode::copy_to`].
pub fn render_to_string(node: &impl MarkupNode) -> RenderResult<String> {
    let mut acc = String::new();
    render_into(node, &mut acc)?;
    Ok(acc)
}
