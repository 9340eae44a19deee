//! Renders a [`Json`] tree as JSON text.
//!
//! The default layout is multi-line: containers open on the current line, put
//! each child on its own line one indent unit deeper, and close at the parent's
//! indent. Object entries render as `"key": value`. Empty containers collapse
//! to `[]` / `{}`.
//!
//! ```text
//! {
//! 	"list": [
//! 		1,
//! 		2.5
//! 	],
//! 	"on": true
//! }
//! ```
//!
//! [`Layout::Compact`] drops all insignificant whitespace for consumers that
//! expect single-line JSON.
//!
//! Reals are written in Rust's shortest round-trip form, which always has a
//! `.` or an exponent (`3.0`, `1e-7`), so they parse back as `Real`. Trees
//! holding NaN or an infinity are rejected before any output is written.

use crate::error::{JsonError, Result};
use crate::value::Json;
use std::fmt::{self, Write};

/// Indent unit of the multi-line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// One tab per level.
    #[default]
    Tab,
    /// The given number of spaces per level.
    Spaces(u8),
}

/// Overall output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One child per line, indented by depth.
    Indented(Indent),
    /// Single line, no whitespace between tokens.
    Compact,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Indented(Indent::Tab)
    }
}

/// Renders values with a fixed [`Layout`].
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    layout: Layout,
}

impl Serializer {
    /// Serializer producing `layout`.
    pub fn new(layout: Layout) -> Self {
        Serializer { layout }
    }

    /// Serializer producing single-line output.
    pub fn compact() -> Self {
        Serializer::new(Layout::Compact)
    }

    /// Layout this serializer produces.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Render `value` into a new string.
    pub fn serialize(&self, value: &Json) -> Result<String> {
        let mut out = String::new();
        self.serialize_into(value, &mut out)?;
        Ok(out)
    }

    /// Render `value` into `out`.
    ///
    /// Nothing is written if the tree holds a NaN or infinite real. A failing
    /// sink may leave partial output behind.
    pub fn serialize_into<W: Write + ?Sized>(&self, value: &Json, out: &mut W) -> Result<()> {
        check_representable(value)?;
        write_value(value, self.layout, 0, out)
            .map_err(|_| JsonError::Serialize("output sink reported an error".to_string()))
    }
}

/// Render `value` in the default indented layout.
pub fn to_string(value: &Json) -> Result<String> {
    Serializer::default().serialize(value)
}

/// Render `value` on a single line.
pub fn to_string_compact(value: &Json) -> Result<String> {
    Serializer::compact().serialize(value)
}

/// Walk the tree and reject values JSON has no syntax for.
fn check_representable(value: &Json) -> Result<()> {
    match value {
        Json::Real(f) if !f.is_finite() => Err(JsonError::Serialize(format!(
            "non-finite number {f} has no JSON representation"
        ))),
        Json::Array(items) => items.iter().try_for_each(check_representable),
        Json::Object(map) => map.values().try_for_each(check_representable),
        _ => Ok(()),
    }
}

fn write_value<W: Write + ?Sized>(
    value: &Json,
    layout: Layout,
    depth: usize,
    out: &mut W,
) -> fmt::Result {
    match value {
        Json::Null => out.write_str("null"),
        Json::Boolean(b) => out.write_str(if *b { "true" } else { "false" }),
        Json::Integer(i) => write!(out, "{i}"),
        // Debug output is the shortest repr that parses back to the same f64 and
        // always carries a '.' or an exponent.
        Json::Real(f) => write!(out, "{f:?}"),
        Json::Text(s) => write_string(s, out),
        Json::Array(items) if items.is_empty() => out.write_str("[]"),
        Json::Array(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                write_separator(i, layout, depth + 1, out)?;
                write_value(item, layout, depth + 1, out)?;
            }
            write_closing(']', layout, depth, out)
        }
        Json::Object(map) if map.is_empty() => out.write_str("{}"),
        Json::Object(map) => {
            out.write_char('{')?;
            for (i, (key, item)) in map.iter().enumerate() {
                write_separator(i, layout, depth + 1, out)?;
                write_string(key, out)?;
                out.write_str(match layout {
                    Layout::Indented(_) => ": ",
                    Layout::Compact => ":",
                })?;
                write_value(item, layout, depth + 1, out)?;
            }
            write_closing('}', layout, depth, out)
        }
    }
}

/// Comma before every child but the first, then a fresh indented line in the
/// multi-line layout.
fn write_separator<W: Write + ?Sized>(
    index: usize,
    layout: Layout,
    depth: usize,
    out: &mut W,
) -> fmt::Result {
    if index > 0 {
        out.write_char(',')?;
    }
    if let Layout::Indented(indent) = layout {
        out.write_char('\n')?;
        write_indent(indent, depth, out)?;
    }
    Ok(())
}

fn write_closing<W: Write + ?Sized>(
    bracket: char,
    layout: Layout,
    depth: usize,
    out: &mut W,
) -> fmt::Result {
    if let Layout::Indented(indent) = layout {
        out.write_char('\n')?;
        write_indent(indent, depth, out)?;
    }
    out.write_char(bracket)
}

fn write_indent<W: Write + ?Sized>(indent: Indent, depth: usize, out: &mut W) -> fmt::Result {
    for _ in 0..depth {
        match indent {
            Indent::Tab => out.write_char('\t')?,
            Indent::Spaces(n) => {
                for _ in 0..n {
                    out.write_char(' ')?;
                }
            }
        }
    }
    Ok(())
}

/// Quote and escape a string. Escapes mirror what the parser resolves.
fn write_string<W: Write + ?Sized>(s: &str, out: &mut W) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{08}' => out.write_str("\\b")?,
            '\u{0c}' => out.write_str("\\f")?,
            c if c.is_control() => write!(out, "\\u{:04x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
