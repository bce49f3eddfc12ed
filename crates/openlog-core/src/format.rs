//! Adaptive pretty-printer for [`Value`] trees.
//!
//! Every container is first rendered inline (`[1, 2]`, `{a: 1}`). If that
//! line would take more than half of the available width it is expanded
//! vertically, one child per line, each level indented by two spaces:
//!
//! ```text
//! [
//!   {id: 1, name: alpha},
//!   {id: 2, name: gamma}
//! ]
//! ```
//!
//! Children of a vertical container apply the same rule to the line they
//! occupy (indentation and `key: ` label included), except that a child whose
//! own inline form is shorter than a fifth of the width always stays inline.
//! That keeps small leaf objects on one line inside large expanded parents.
//!
//! Rendering is pure: the same value and width always produce the same bytes.

use std::fmt::Write;

use crate::value::{Mapping, Value};

/// Width assumed when the terminal size cannot be queried.
pub const DEFAULT_WIDTH: usize = 80;

const INDENT: usize = 2;

/// Renders values for a fixed width budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    width: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Formatter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Formatter sized to the current terminal, or [`DEFAULT_WIDTH`].
    pub fn detect() -> Self {
        Self::new(crate::terminal::terminal_width())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_node(&mut out, value, 0, 0, false);
        out
    }

    /// Whether `render` would expand `value` over several lines at the top level.
    pub fn is_vertical(&self, value: &Value) -> bool {
        !is_empty_container(value)
            && !value.is_scalar()
            && self.exceeds_half(inline(value).chars().count())
    }

    /// `indent` is the column the node's line starts at and `label` the width
    /// of a `key: ` label already written on that line.
    fn write_node(
        &self,
        out: &mut String,
        value: &Value,
        indent: usize,
        label: usize,
        under_vertical: bool,
    ) {
        if value.is_scalar() || is_empty_container(value) {
            write_inline(out, value);
            return;
        }

        let flat = inline(value);
        let len = flat.chars().count();

        if under_vertical && self.is_small(len) {
            out.push_str(&flat);
            return;
        }
        if !self.exceeds_half(indent + label + len) {
            out.push_str(&flat);
            return;
        }
        self.write_vertical(out, value, indent);
    }

    fn write_vertical(&self, out: &mut String, value: &Value, indent: usize) {
        let (open, close) = brackets(value);
        let children = children(value);
        let child_indent = indent + INDENT;

        out.push(open);
        out.push('\n');
        for (i, (key, child)) in children.iter().enumerate() {
            push_spaces(out, child_indent);
            let label = match key {
                Some(key) => {
                    out.push_str(key);
                    out.push_str(": ");
                    key.chars().count() + 2
                }
                None => 0,
            };
            self.write_node(out, child, child_indent, label, true);
            if i + 1 < children.len() {
                out.push(',');
            }
            out.push('\n');
        }
        push_spaces(out, indent);
        out.push(close);
    }

    /// `len > 0.5 * width`, in integer arithmetic.
    fn exceeds_half(&self, len: usize) -> bool {
        len * 2 > self.width
    }

    /// `len < 0.2 * width`, in integer arithmetic.
    fn is_small(&self, len: usize) -> bool {
        len * 5 < self.width
    }
}

/// Render `value` for a terminal `width` columns wide.
pub fn render(value: &Value, width: usize) -> String {
    Formatter::new(width).render(value)
}

/// Single-line form of `value`, whatever its length.
pub fn inline(value: &Value) -> String {
    let mut out = String::new();
    write_inline(&mut out, value);
    out
}

fn write_inline(out: &mut String, value: &Value) {
    match value {
        Value::Scalar(s) => {
            let _ = write!(out, "{}", s);
        }
        Value::Sequence(items) => {
            out.push('[');
            write_joined(out, items.iter().map(|v| (None, v)));
            out.push(']');
        }
        Value::Mapping(m) => {
            out.push('{');
            write_joined(out, m.iter().map(|(k, v)| (Some(k), v)));
            out.push('}');
        }
        Value::Set(_) => {
            out.push('{');
            write_joined(out, children(value).into_iter());
            out.push('}');
        }
    }
}

fn write_joined<'a>(out: &mut String, items: impl Iterator<Item = (Option<&'a str>, &'a Value)>) {
    for (i, (key, item)) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if let Some(key) = key {
            out.push_str(key);
            out.push_str(": ");
        }
        write_inline(out, item);
    }
}

/// Direct children with their labels, in rendering order.
fn children(value: &Value) -> Vec<(Option<&str>, &Value)> {
    match value {
        Value::Scalar(_) => Vec::new(),
        Value::Sequence(items) => items.iter().map(|v| (None, v)).collect(),
        Value::Mapping(m) => mapping_children(m),
        Value::Set(members) => {
            // canonical order: by inline text, ties keep insertion order
            let mut keyed: Vec<(String, &Value)> =
                members.iter().map(|v| (inline(v), v)).collect();
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
            keyed.into_iter().map(|(_, v)| (None, v)).collect()
        }
    }
}

fn mapping_children(m: &Mapping) -> Vec<(Option<&str>, &Value)> {
    m.iter().map(|(k, v)| (Some(k), v)).collect()
}

fn brackets(value: &Value) -> (char, char) {
    match value {
        Value::Sequence(_) => ('[', ']'),
        _ => ('{', '}'),
    }
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Scalar(_) => false,
        Value::Sequence(items) | Value::Set(items) => items.is_empty(),
        Value::Mapping(m) => m.is_empty(),
    }
}

fn push_spaces(out: &mut String, n: usize) {
    out.extend(std::iter::repeat(' ').take(n));
}
