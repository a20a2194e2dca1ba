//! Token types
//!
//! Tokens form one flat, depth-first sequence in document order. Nesting is
//! implicit: a container's `size` says how many direct children follow it.

use std::fmt;

/// Lexical kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{ ... }`, `size` is the number of key/value pairs
    Object,
    /// `[ ... ]`, `size` is the number of elements
    Array,
    /// `"..."`, range excludes the quotes
    String,
    /// Any bare value: number, `true`, `false`, `null`
    Primitive,
}

impl TokenKind {
    /// Returns the kind name used in messages and log lines
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Object => "object",
            TokenKind::Array => "array",
            TokenKind::String => "string",
            TokenKind::Primitive => "primitive",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A lexical unit with its half-open byte range `[start, end)` in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// Direct child count for containers, always 0 for strings and primitives
    pub size: usize,
}

impl Default for Token {
    fn default() -> Self {
        Self {
            kind: TokenKind::Primitive,
            start: 0,
            end: 0,
            size: 0,
        }
    }
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            size: 0,
        }
    }

    /// Returns the bytes this token covers
    ///
    /// For strings this is the raw text between the quotes, escapes intact.
    pub fn text<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        src.get(self.start..self.end).unwrap_or_default()
    }

    /// Returns the bytes of the full JSON value, including string quotes
    pub fn raw<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        match self.kind {
            TokenKind::String => src
                .get(self.start.saturating_sub(1)..self.end + 1)
                .unwrap_or_default(),
            _ => self.text(src),
        }
    }

    /// Returns true for a quoted string, the only valid object key
    pub fn is_str(&self) -> bool {
        self.kind == TokenKind::String
    }

    /// Returns true if this token is a primitive of the form `-?[0-9]+`
    pub fn is_int_literal(&self, src: &[u8]) -> bool {
        if self.kind != TokenKind::Primitive {
            return false;
        }
        let text = self.text(src);
        let digits = text.strip_prefix(b"-").unwrap_or(text);
        !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
    }

    /// Returns the integer value of this token if it is an integer literal
    /// that fits in 32 bits
    pub fn as_i32(&self, src: &[u8]) -> Option<i32> {
        if !self.is_int_literal(src) {
            return None;
        }
        std::str::from_utf8(self.text(src)).ok()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(src: &[u8]) -> Token {
        Token::new(TokenKind::Primitive, 0, src.len())
    }

    #[test]
    fn test_int_literals() {
        assert_eq!(prim(b"0").as_i32(b"0"), Some(0));
        assert_eq!(prim(b"-42").as_i32(b"-42"), Some(-42));
        assert_eq!(prim(b"2147483647").as_i32(b"2147483647"), Some(i32::MAX));
        assert_eq!(prim(b"-2147483648").as_i32(b"-2147483648"), Some(i32::MIN));
    }

    #[test]
    fn test_non_int_literals() {
        for src in [&b"-"[..], b"1.5", b"1e3", b"true", b"null", b"12a", b"--1", b""] {
            assert_eq!(prim(src).as_i32(src), None, "{:?}", src);
        }
        // Overflow is not an integer
        assert_eq!(prim(b"2147483648").as_i32(b"2147483648"), None);
    }

    #[test]
    fn test_string_is_never_int() {
        let src = b"\"12\"";
        let tok = Token::new(TokenKind::String, 1, 3);
        assert_eq!(tok.text(src), b"12");
        assert!(!tok.is_int_literal(src));
        assert_eq!(tok.raw(src), b"\"12\"");
    }

    #[test]
    fn test_is_str() {
        assert!(Token::new(TokenKind::String, 1, 5).is_str());
        assert!(!prim(b"meta").is_str());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::Object.name(), "object");
        assert_eq!(TokenKind::Primitive.to_string(), "primitive");
    }
}
