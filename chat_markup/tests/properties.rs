// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{cell::RefCell, thread};

use pretty_assertions::assert_eq;
use r3bl_chat_markup::{BufferAllocator, BufferSettings, BufferTier, CharBufferPool,
                       EscapeTable, FormatSpec, Formattable, Locale, MarkupNode,
                       PrefixEscape, RenderError, TextNode, ValueNode, concat_nodes,
                       count_node, count_value, render_to_chars, render_to_string,
                       transform_node_into, transform_value_into};
use test_case::test_case;

const HTML: EscapeTable = EscapeTable::new(&[('<', "&lt;"), ('>', "&gt;"), ('"', "&quot;")]);

/// Fits only if offered at least `required` chars, and records every offer.
struct Needs {
    required: usize,
    offered: RefCell<Vec<usize>>,
}

impl Needs {
    fn new(required: usize) -> Self {
        Self {
            required,
            offered: RefCell::new(vec![]),
        }
    }
}

impl Formattable for Needs {
    fn try_format(&self, dst: &mut [char], _: &FormatSpec<'_>, _: &Locale) -> Option<usize> {
        self.offered.borrow_mut().push(dst.len());
        if dst.len() < self.required {
            return None;
        }
        dst[..self.required].fill('n');
        Some(self.required)
    }
}

#[test_case("" ; "empty")]
#[test_case("no specials" ; "none escaped")]
#[test_case("<<>>" ; "all escaped")]
#[test_case("say \"<hi>\"" ; "mixed")]
fn test_two_phase_sizing_is_exact(source: &str) {
    let expected: String = source
        .chars()
        .map(|ch| match ch {
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            other => other.to_string(),
        })
        .collect();

    let node = TextNode::new(source);
    let sizing = count_node(&node, &HTML);
    assert_eq!(sizing.expanded_total(), expected.chars().count());
    let mut dst = vec!['\0'; sizing.expanded_total()];
    assert_eq!(transform_node_into(&node, &HTML, &sizing, &mut dst).unwrap(), dst.len());
    assert_eq!(dst.iter().collect::<String>(), expected);

    let pool = CharBufferPool::new(4);
    let allocator = BufferAllocator::new(BufferSettings::DEFAULT, &pool);
    let sizing =
        count_value(&allocator, source, &FormatSpec::NONE, &Locale::INVARIANT, &HTML).unwrap();
    let mut dst = vec!['\0'; sizing.expanded_total()];
    let written = transform_value_into(
        &allocator,
        source,
        &FormatSpec::NONE,
        &Locale::INVARIANT,
        &HTML,
        None,
        &mut dst,
    )
    .unwrap();
    assert_eq!(written, dst.len());
    assert_eq!(dst.iter().collect::<String>(), expected);
}

#[test_case(2.0, 1, 1024, 1000)]
#[test_case(1.5, 3, 1000, 999)]
#[test_case(1.1, 1, 5000, 5000)]
#[test_case(10.0, 7, 100_000, 12_345)]
fn test_growth_terminates(growth: f64, initial: usize, max: usize, required: usize) {
    let pool = CharBufferPool::new(4);
    let settings = BufferSettings::try_new(growth, initial, max, 64, 4096).unwrap();
    let allocator = BufferAllocator::new(settings, &pool);
    let value = Needs::new(required);

    let written = allocator
        .with_formatted(&value, &FormatSpec::NONE, &Locale::INVARIANT, None, |it: &[char]| {
            it.len()
        })
        .unwrap();
    assert_eq!(written, required);

    // Strictly increasing, never past max, and at most ceil(log_growth(required /
    // initial)) growth steps after the first attempt.
    let offered = value.offered.borrow();
    assert!(offered.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(offered.iter().all(|&size| size <= max));
    let bound = ((required as f64 / initial as f64).ln() / growth.ln()).ceil() as usize + 1;
    assert!(offered.len() <= bound, "{} attempts, bound {bound}", offered.len());
    assert_eq!(pool.stats().outstanding(), 0);
}

#[test]
fn test_growth_fails_only_past_max() {
    let pool = CharBufferPool::new(4);
    let settings = BufferSettings::try_new(2.0, 8, 100, 16, 64).unwrap();
    let allocator = BufferAllocator::new(settings, &pool);

    let measured = allocator.measure(&Needs::new(100), &FormatSpec::NONE, &Locale::INVARIANT);
    assert_eq!(measured.unwrap(), 100);

    let result = allocator.measure(&Needs::new(101), &FormatSpec::NONE, &Locale::INVARIANT);
    assert!(matches!(
        result,
        Err(RenderError::CapacityExceeded {
            attempted: 100,
            max_size: 100
        })
    ));
    assert_eq!(pool.stats().outstanding(), 0);
}

#[test_case(63, BufferTier::Stack, 0)]
#[test_case(64, BufferTier::Stack, 0)]
#[test_case(65, BufferTier::Pooled, 1)]
#[test_case(255, BufferTier::Pooled, 1)]
#[test_case(256, BufferTier::Pooled, 1)]
#[test_case(257, BufferTier::Heap, 0)]
fn test_tier_boundaries(size: usize, tier: BufferTier, rents: usize) {
    let pool = CharBufferPool::new(4);
    let settings = BufferSettings::try_new(2.0, 8, 1024, 64, 256).unwrap();
    assert_eq!(settings.select_tier(size), tier);

    let allocator = BufferAllocator::new(settings, &pool);
    let value = Needs::new(size);
    allocator
        .with_formatted(&value, &FormatSpec::NONE, &Locale::INVARIANT, Some(size), |_: &[char]| ())
        .unwrap();
    assert_eq!(*value.offered.borrow(), vec![size]);
    assert_eq!(pool.stats().rented, rents);
}

#[test]
fn test_line_injection_scenario() {
    let node = TextNode::new("line1\nline2\nline3").line_prefixed(">");
    assert_eq!(render_to_string(&node).unwrap(), ">line1\n>line2\n>line3");
    assert_eq!(node.total_length(), "line1\nline2\nline3".len() + 2 + 1);
}

#[test]
fn test_concat_is_associative() {
    let a = TextNode::new("alpha ");
    let b = ValueNode::try_new(3.5_f32).unwrap();
    let c = TextNode::new(" <omega>").expanded(HTML);

    let left = concat_nodes(concat_nodes(&a, &b), &c);
    let right = concat_nodes(&a, concat_nodes(&b, &c));

    assert_eq!(left.total_length(), right.total_length());
    assert_eq!(render_to_chars(&left).unwrap(), render_to_chars(&right).unwrap());

    let mut separately = render_to_string(&a).unwrap();
    separately.push_str(&render_to_string(&b).unwrap());
    separately.push_str(&render_to_string(&c).unwrap());
    assert_eq!(render_to_string(&left).unwrap(), separately);
    assert_eq!(render_to_string(&left).unwrap(), "alpha 3.5 &lt;omega&gt;");
}

#[test]
fn test_render_is_idempotent() {
    let node = TextNode::new("a\nb")
        .then(ValueNode::try_new(-0.25_f64).unwrap())
        .line_prefixed("| ")
        .enclosed("**", "**");
    let total_length = node.total_length();
    assert_eq!(node.total_length(), total_length);
    let first = render_to_chars(&node).unwrap();
    let second = render_to_chars(&node).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), total_length);
    assert_eq!(node.chars().collect::<Vec<_>>(), first);
}

#[test]
fn test_concurrent_renders_of_one_tree() {
    let long_text = "x*".repeat(400);
    let node = TextNode::new(&long_text)
        .expanded(PrefixEscape::backslash(&['*']))
        .then(ValueNode::try_new(long_text.clone()).unwrap())
        .line_prefixed("> ");
    let expected = render_to_string(&node).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    (0..16)
                        .map(|_| render_to_string(&node).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            for rendered in handle.join().unwrap() {
                assert_eq!(rendered, expected);
            }
        }
    });
}

#[test]
fn test_rendering_with_tracing_subscriber() {
    let _unused = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let pool = CharBufferPool::new(1);
    let settings = BufferSettings::try_new(2.0, 1, 16, 2, 8).unwrap();
    let allocator = BufferAllocator::new(settings, &pool);
    let result = allocator.measure(&Needs::new(17), &FormatSpec::NONE, &Locale::INVARIANT);
    assert!(matches!(result, Err(RenderError::CapacityExceeded { .. })));
}
