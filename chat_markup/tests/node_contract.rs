// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Every node kind, checked against the same contract: the lengths add up, `copy_to`
//! writes exactly `total_length` chars, and `try_get_char` and `chars` agree with what
//! `copy_to` wrote.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use r3bl_chat_markup::{EscapeTable, ExpandedValue, FormatSpec, Locale, MarkupNode,
                       PrefixEscape, TextNode, ValueFormat, ValueNode, concat_nodes,
                       render_to_chars};

const MD: PrefixEscape = PrefixEscape::backslash(&['*', '_', '`', '~', '|']);
const HTML: EscapeTable = EscapeTable::new(&[('<', "&lt;"), ('>', "&gt;"), ('&', "&amp;")]);

/// Returns the rendered text so callers can also check the content.
fn check_contract(node: &impl MarkupNode) -> String {
    let total_length = node.total_length();
    assert_eq!(total_length, node.syntax_length() + node.inner_length());
    assert_eq!(node.is_empty(), total_length == 0);

    // Extra room at the end must be left alone.
    let mut dst = vec!['#'; total_length + 3];
    let written = node.copy_to(&mut dst).unwrap();
    assert_eq!(written, total_length);
    assert_eq!(&dst[total_length..], &['#', '#', '#']);
    dst.truncate(total_length);

    assert_eq!(render_to_chars(node).unwrap(), dst);
    assert_eq!(node.chars().collect::<Vec<_>>(), dst);
    for (index, expected) in dst.iter().enumerate() {
        assert_eq!(node.try_get_char(index), Some(*expected), "index {index}");
    }
    assert_eq!(node.try_get_char(total_length), None);
    assert_eq!(node.try_get_char(usize::MAX), None);

    dst.into_iter().collect()
}

#[test]
fn test_text_node() {
    assert_eq!(check_contract(&TextNode::new("hello")), "hello");
    assert_eq!(check_contract(&TextNode::new("héllo wörld 🦀")), "héllo wörld 🦀");
    assert_eq!(check_contract(&TextNode::new("")), "");
}

#[test]
fn test_value_nodes() {
    assert_eq!(check_contract(&ValueNode::try_new(0_u8).unwrap()), "0");
    assert_eq!(check_contract(&ValueNode::try_new(i64::MIN).unwrap()), "-9223372036854775808");
    assert_eq!(check_contract(&ValueNode::try_new('x').unwrap()), "x");
    assert_eq!(check_contract(&ValueNode::try_new(true).unwrap()), "true");
    assert_eq!(check_contract(&ValueNode::try_new("").unwrap()), "");

    let money = ValueFormat {
        spec: FormatSpec::NONE.with_precision(2).with_width(12),
        locale: Locale::new(',', Some(' ')),
        ..Default::default()
    };
    assert_eq!(
        check_contract(&ValueNode::try_with_format(9_876_543.21_f64, money).unwrap()),
        "9 876 543,21"
    );

    let date = ValueFormat {
        spec: FormatSpec::NONE.with_pattern("%Y-%m-%d"),
        ..Default::default()
    };
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    assert_eq!(
        check_contract(&ValueNode::try_with_format(day, date).unwrap()),
        "2024-02-29"
    );
}

#[test]
fn test_composites() {
    let node = concat_nodes(TextNode::new("a"), TextNode::new("b"));
    assert_eq!(check_contract(&node), "ab");

    let node = TextNode::new("spoiler").enclosed("||", "||");
    assert_eq!(check_contract(&node), "||spoiler||");

    let node = TextNode::new("").enclosed("", "");
    assert_eq!(check_contract(&node), "");

    let node = TextNode::new("x")
        .then(ValueNode::try_new(7_u16).unwrap())
        .enclosed("~~", "~~")
        .then(TextNode::new("!"));
    assert_eq!(check_contract(&node), "~~x7~~!");
}

#[test]
fn test_expanding_wrappers() {
    let node = TextNode::new("<a href>&").expanded(HTML);
    assert_eq!(check_contract(&node), "&lt;a href&gt;&amp;");

    let node = TextNode::new("**not bold**").expanded(MD);
    assert_eq!(check_contract(&node), "\\*\\*not bold\\*\\*");

    let node = ExpandedValue::try_new("a_b", MD).unwrap();
    assert_eq!(check_contract(&node), "a\\_b");

    let node = TextNode::new("q1\nq2").line_prefixed("> ");
    assert_eq!(check_contract(&node), "> q1\n> q2");

    let node = TextNode::new("").line_prefixed(">>> ");
    assert_eq!(check_contract(&node), ">>> ");
}

#[test]
fn test_deeply_nested_tree() {
    let node = TextNode::new("header")
        .enclosed("**", "**")
        .then(TextNode::new("\n"))
        .then(TextNode::new("*code*").expanded(MD).enclosed("`", "`"))
        .then(TextNode::new("\ncount: "))
        .then(ValueNode::try_new(1_000_000_u32).unwrap())
        .line_prefixed("> ")
        .enclosed("||", "||")
        .line_prefixed("-# ");

    assert_eq!(
        check_contract(&node),
        "-# ||> **header**\n-# > `\\*code\\*`\n-# > count: 1000000||"
    );
}

#[test]
fn test_borrowed_operands() {
    let shared = TextNode::new("echo").enclosed("_", "_");
    let node = concat_nodes(&shared, &shared).then(&shared);
    assert_eq!(check_contract(&node), "_echo__echo__echo_");
}
