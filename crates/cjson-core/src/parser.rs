//! Recursive-descent JSON parser producing a [`Json`] tree.
//!
//! One function per construct, dispatching on the next non-whitespace byte:
//! `n`/`t`/`f` literals, `"` strings, `[` arrays, `{` objects, and digits or a
//! sign for numbers. Any sub-parse failure propagates straight up through `?`;
//! there is no backtracking and no partial result.
//!
//! # Key design decisions
//!
//! - **Escapes are resolved**: `\" \\ \/ \b \f \n \r \t` and `\uXXXX` (including
//!   UTF-16 surrogate pairs) become the characters they denote. Unknown escapes
//!   and lone surrogates are errors. The serializer escapes the same set.
//! - **Number tagging**: a literal with a fraction (`1.5`) or an exponent (`1e3`)
//!   becomes [`Json::Real`], anything else [`Json::Integer`]. A leading `+` is
//!   tolerated. Integers outside `i64` and reals that overflow to infinity are
//!   errors.
//! - **Whole input**: after the root value only whitespace (space, tab, `\n`,
//!   `\r`) may follow.
//! - **Bounded nesting**: [`ParserConfig::max_depth`] caps array/object nesting
//!   and reports deeper input as a parse error.

use crate::error::{JsonError, Result};
use crate::value::{Json, Map};

/// Nesting limit used by [`Parser::default`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of nested arrays/objects. Scalars at the root need none.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Reusable parser front-end. Holds only configuration; every call to
/// [`Parser::parse`] runs with its own cursor.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Parser with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser with explicit settings.
    pub fn with_config(config: ParserConfig) -> Self {
        Parser { config }
    }

    /// Settings this parser runs with.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete JSON document.
    pub fn parse(&self, text: &str) -> Result<Json> {
        log::trace!(
            "parsing {} bytes of JSON (max depth {})",
            text.len(),
            self.config.max_depth
        );
        let mut cursor = Cursor::new(text, self.config.max_depth);
        let value = cursor.parse_value(0)?;
        cursor.skip_whitespace();
        if let Some(c) = cursor.peek_char() {
            return Err(cursor.error(format!("unexpected trailing character {c:?}")));
        }
        Ok(value)
    }
}

/// Parse `text` with the default configuration.
///
/// ```
/// use cjson_core::{parse, Json};
///
/// let json = parse(r#"{"key1": 56, "key2": [1.5, "x"]}"#).unwrap();
/// assert_eq!(json["key1"], 56);
/// assert_eq!(json["key2"][0], 1.5);
/// assert!(parse("[1, 2,]").is_err());
/// ```
pub fn parse(text: &str) -> Result<Json> {
    Parser::default().parse(text)
}

/// Per-call parsing state: the input and a byte offset into it.
struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, max_depth: usize) -> Self {
        Cursor {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> JsonError {
        self.error_at(self.pos, message)
    }

    /// Build a parse error pointing at byte offset `pos`, reported as a 1-based
    /// line and character column.
    fn error_at(&self, pos: usize, message: impl Into<String>) -> JsonError {
        let consumed = &self.bytes[..pos.min(self.bytes.len())];
        let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = consumed
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        // Count UTF-8 lead bytes so multi-byte characters occupy one column.
        let column = consumed[line_start..]
            .iter()
            .filter(|&&b| b & 0xC0 != 0x80)
            .count()
            + 1;
        JsonError::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Dispatch on the next non-whitespace byte.
    fn parse_value(&mut self, depth: usize) -> Result<Json> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'n') => self.parse_literal("null", Json::Null),
            Some(b't') => self.parse_literal("true", Json::Boolean(true)),
            Some(b'f') => self.parse_literal("false", Json::Boolean(false)),
            Some(b'"') => self.parse_string().map(Json::Text),
            Some(b'[') => self.parse_array(depth),
            Some(b'{') => self.parse_object(depth),
            Some(b'0'..=b'9' | b'-' | b'+') => self.parse_number(),
            Some(_) => {
                let c = self.peek_char().unwrap_or(char::REPLACEMENT_CHARACTER);
                Err(self.error(format!("unexpected character {c:?}")))
            }
        }
    }

    fn parse_literal(&mut self, literal: &str, value: Json) -> Result<Json> {
        if self.bytes[self.pos..].starts_with(literal.as_bytes()) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(self.error(format!("expected '{literal}'")))
        }
    }

    fn descend(&self, depth: usize) -> Result<usize> {
        if depth >= self.max_depth {
            return Err(self.error(format!(
                "nesting deeper than {} levels",
                self.max_depth
            )));
        }
        Ok(depth + 1)
    }

    /// `[` ws ( `]` | value ( `,` value )* `]` )
    fn parse_array(&mut self, depth: usize) -> Result<Json> {
        let depth = self.descend(depth)?;
        self.pos += 1;
        self.skip_whitespace();

        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Json::Array(items));
        }

        loop {
            items.push(self.parse_value(depth)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Json::Array(items));
                }
                Some(_) => return Err(self.error("expected ',' or ']' in array")),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    /// `{` ws ( `}` | "key" ws `:` value ( `,` … )* `}` )
    ///
    /// Duplicate keys overwrite earlier ones.
    fn parse_object(&mut self, depth: usize) -> Result<Json> {
        let depth = self.descend(depth)?;
        self.pos += 1;
        self.skip_whitespace();

        let mut map = Map::new();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Json::Object(map));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.error("expected '\"' to start an object key"));
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':' after object key"));
            }
            self.pos += 1;

            let value = self.parse_value(depth)?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Json::Object(map));
                }
                Some(_) => return Err(self.error("expected ',' or '}' in object")),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    /// A quoted string with escapes resolved. The cursor sits on the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();

        loop {
            // Copy the run up to the next quote or backslash in one go; both are
            // ASCII, so the slice boundaries are always character boundaries.
            let start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' {
                    break;
                }
                self.pos += 1;
            }
            out.push_str(&self.text[start..self.pos]);

            match self.peek() {
                None => return Err(self.error_at(open, "unterminated string")),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(_) => {
                    self.pos += 1;
                    self.parse_escape(&mut out)?;
                }
            }
        }
    }

    /// Resolve one escape sequence. The cursor sits just past the backslash.
    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let resolved = match self.peek() {
            None => return Err(self.error("unterminated escape sequence")),
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{08}',
            Some(b'f') => '\u{0c}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.pos += 1;
                out.push(self.parse_unicode_escape()?);
                return Ok(());
            }
            Some(_) => {
                let c = self.peek_char().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(self.error(format!("invalid escape sequence '\\{c}'")));
            }
        };
        self.pos += 1;
        out.push(resolved);
        Ok(())
    }

    /// `XXXX` after `\u`, joining a high surrogate with the `\uXXXX` low
    /// surrogate that must follow it.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let start = self.pos - 2;
        let high = self.parse_hex4()?;
        let code = match high {
            0xD800..=0xDBFF => {
                if !self.bytes[self.pos..].starts_with(b"\\u") {
                    return Err(self.error_at(start, "unpaired surrogate in unicode escape"));
                }
                self.pos += 2;
                let low = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error_at(start, "invalid low surrogate in unicode escape"));
                }
                0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_at(start, "unpaired surrogate in unicode escape"));
            }
            _ => u32::from(high),
        };
        char::from_u32(code).ok_or_else(|| self.error_at(start, "invalid unicode escape"))
    }

    fn parse_hex4(&mut self) -> Result<u16> {
        let digits = self
            .bytes
            .get(self.pos..self.pos + 4)
            .filter(|digits| digits.iter().all(u8::is_ascii_hexdigit))
            .ok_or_else(|| self.error("expected 4 hex digits in unicode escape"))?;
        let value = digits.iter().fold(0u16, |acc, &b| {
            // is_ascii_hexdigit guarantees to_digit succeeds
            let digit = char::from(b).to_digit(16).unwrap_or(0) as u16;
            (acc << 4) | digit
        });
        self.pos += 4;
        Ok(value)
    }

    /// `[+-]? digits ( . digits )? ( [eE] [+-]? digits )?`
    fn parse_number(&mut self) -> Result<Json> {
        let start = self.pos;
        if let Some(b'-' | b'+') = self.peek() {
            self.pos += 1;
        }
        if self.skip_digits() == 0 {
            return Err(self.error("expected digit in number"));
        }

        let mut is_real = false;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if self.skip_digits() == 0 {
                return Err(self.error("expected digit after decimal point"));
            }
            is_real = true;
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'-' | b'+') = self.peek() {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.error("expected digit in exponent"));
            }
            is_real = true;
        }

        let literal = &self.text[start..self.pos];
        if is_real {
            match literal.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Json::Real(f)),
                _ => Err(self.error_at(start, format!("number out of range: {literal}"))),
            }
        } else {
            literal
                .parse::<i64>()
                .map(Json::Integer)
                .map_err(|_| self.error_at(start, format!("integer out of range: {literal}")))
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(text: &str) -> (usize, usize, String) {
        match parse(text).unwrap_err() {
            JsonError::Parse {
                line,
                column,
                message,
            } => (line, column, message),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn literals() {
        assert_eq!(parse("null").unwrap(), Json::Null);
        assert_eq!(parse("true").unwrap(), Json::Boolean(true));
        assert_eq!(parse(" false ").unwrap(), Json::Boolean(false));
        assert!(parse("nul").is_err());
        assert!(parse("tru").is_err());
        assert!(parse("falsy").is_err());
    }

    #[test]
    fn numbers_are_tagged() {
        assert_eq!(parse("-3").unwrap(), Json::Integer(-3));
        assert_eq!(parse("+7").unwrap(), Json::Integer(7));
        assert_eq!(parse("-3.4").unwrap(), Json::Real(-3.4));
        assert_eq!(parse("2e3").unwrap(), Json::Real(2000.0));
        assert_eq!(parse("1.5E-2").unwrap(), Json::Real(0.015));
        assert_eq!(parse("0").unwrap(), Json::Integer(0));
    }

    #[test]
    fn malformed_numbers() {
        assert!(parse("-").is_err());
        assert!(parse("1.").is_err());
        assert!(parse("1e").is_err());
        assert!(parse("1.2.3").is_err());
        assert!(parse("9223372036854775808").is_err());
        assert!(parse("1e999").is_err());
        assert_eq!(
            parse("-9223372036854775808").unwrap(),
            Json::Integer(i64::MIN)
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            parse(r#""a\"b\\c\/d\n\t\r\b\f""#).unwrap(),
            Json::Text("a\"b\\c/d\n\t\r\u{08}\u{0c}".to_string())
        );
        assert_eq!(parse(r#""\u00e9""#).unwrap(), Json::Text("é".to_string()));
        assert_eq!(
            parse(r#""\ud83d\ude00""#).unwrap(),
            Json::Text("😀".to_string())
        );
        assert_eq!(parse("\"héllo wörld\"").unwrap(), Json::Text("héllo wörld".to_string()));
    }

    #[test]
    fn bad_escapes() {
        assert!(parse(r#""\x""#).is_err());
        assert!(parse(r#""\u12""#).is_err());
        assert!(parse(r#""\u+123""#).is_err());
        assert!(parse(r#""\ud83d""#).is_err());
        assert!(parse(r#""\ude00""#).is_err());
        assert!(parse(r#""\ud83dA""#).is_err());
        assert!(parse("\"abc\\").is_err());
    }

    #[test]
    fn unterminated_string_points_at_open_quote() {
        let (line, column, message) = parse_err("[1, \"abc");
        assert_eq!((line, column), (1, 5));
        assert_eq!(message, "unterminated string");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(parse("[]").unwrap(), Json::new_array());
        assert_eq!(parse("{ }").unwrap(), Json::new_object());
        assert_eq!(parse("[ \n ]").unwrap(), Json::new_array());
    }

    #[test]
    fn trailing_commas_rejected() {
        assert!(parse("[1,]").is_err());
        assert!(parse(r#"{"a":1,}"#).is_err());
    }

    #[test]
    fn missing_colon() {
        let (_, _, message) = parse_err(r#"{"a" 1}"#);
        assert_eq!(message, "expected ':' after object key");
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let json = parse(r#"{"a":1,"a":2}"#).unwrap();
        assert_eq!(json.len().unwrap(), 1);
        assert_eq!(json["a"], 2);
    }

    #[test]
    fn trailing_characters_rejected() {
        let (_, column, message) = parse_err("[1] x");
        assert_eq!(column, 5);
        assert_eq!(message, "unexpected trailing character 'x'");
    }

    #[test]
    fn error_positions_are_line_and_column() {
        let (line, column, _) = parse_err("{\n  \"ü\": ?\n}");
        assert_eq!((line, column), (2, 8));
    }

    #[test]
    fn depth_limit() {
        let parser = Parser::with_config(ParserConfig { max_depth: 2 });
        assert!(parser.parse("[[1]]").is_ok());
        let (_, _, message) = match parser.parse("[[[1]]]").unwrap_err() {
            JsonError::Parse {
                line,
                column,
                message,
            } => (line, column, message),
            other => panic!("unexpected error {other:?}"),
        };
        assert_eq!(message, "nesting deeper than 2 levels");

        let flat = Parser::with_config(ParserConfig { max_depth: 0 });
        assert!(flat.parse("42").is_ok());
        assert!(flat.parse("{}").is_err());
    }

    #[test]
    fn default_depth_survives_deep_input() {
        let deep = format!("{}{}", "[".repeat(600), "]".repeat(600));
        assert!(parse(&deep).is_err());
        let ok = format!("{}{}", "[".repeat(500), "]".repeat(500));
        assert!(parse(&ok).is_ok());
    }
}
