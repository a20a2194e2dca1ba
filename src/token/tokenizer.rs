//! Flat JSON tokenizer
//!
//! Produces the token sequence for a byte buffer in one forward scan without
//! building a tree. The same scan serves two passes: without an output
//! buffer it only counts tokens, with one it fills the buffer as well.
//! Both passes run identical validation.

use crate::config::LexMode;

use super::errors::{LexError, LexResult};
use super::types::{Token, TokenKind};

/// What an open container accepts next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Right after `[`
    ArrayValueOrClose,
    /// Right after a `,` in an array
    ArrayValue,
    /// After an array element
    ArrayCommaOrClose,
    /// Right after `{`
    ObjectKeyOrClose,
    /// Right after a `,` in an object
    ObjectKey,
    /// After a key
    ObjectColon,
    /// After a `:`
    ObjectValue,
    /// After an object value
    ObjectCommaOrClose,
}

impl Expect {
    fn is_object(self) -> bool {
        matches!(
            self,
            Expect::ObjectKeyOrClose
                | Expect::ObjectKey
                | Expect::ObjectColon
                | Expect::ObjectValue
                | Expect::ObjectCommaOrClose
        )
    }

    fn may_close(self) -> bool {
        matches!(
            self,
            Expect::ArrayValueOrClose
                | Expect::ArrayCommaOrClose
                | Expect::ObjectKeyOrClose
                | Expect::ObjectCommaOrClose
        )
    }
}

/// An open container on the scan stack
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Index of the container token
    token: usize,
    start: usize,
    expect: Expect,
}

/// Tokenizer for one lexical mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tokenizer {
    mode: LexMode,
}

impl Tokenizer {
    pub fn new(mode: LexMode) -> Self {
        Self { mode }
    }

    /// Scan `src`, returning the number of tokens it contains
    ///
    /// With `out = None` nothing is written. With a buffer, the first
    /// `count` entries are filled; a buffer shorter than the token count
    /// fails with `LexError::NoMem`.
    pub fn parse(&self, src: &[u8], out: Option<&mut [Token]>) -> LexResult<usize> {
        Scan {
            src,
            strict: self.mode == LexMode::Strict,
            pos: 0,
            out,
            next: 0,
            stack: Vec::new(),
        }
        .run()
    }

    /// Count pass
    pub fn count(&self, src: &[u8]) -> LexResult<usize> {
        self.parse(src, None)
    }

    /// Count pass followed by a fill pass into an exactly sized buffer
    pub fn tokenize(&self, src: &[u8]) -> LexResult<Vec<Token>> {
        let count = self.count(src)?;
        let mut tokens = vec![Token::default(); count];
        let filled = self.parse(src, Some(&mut tokens))?;
        tokens.truncate(filled);
        Ok(tokens)
    }
}

/// Tokenize `src` in the given mode
pub fn tokenize(src: &[u8], mode: LexMode) -> LexResult<Vec<Token>> {
    Tokenizer::new(mode).tokenize(src)
}

struct Scan<'a, 'o> {
    src: &'a [u8],
    strict: bool,
    pos: usize,
    out: Option<&'o mut [Token]>,
    /// Tokens produced so far
    next: usize,
    stack: Vec<Frame>,
}

impl Scan<'_, '_> {
    fn run(mut self) -> LexResult<usize> {
        while let Some(&c) = self.src.get(self.pos) {
            match c {
                b'{' | b'[' => self.open(c)?,
                b'}' | b']' => self.close(c)?,
                b'"' => self.string()?,
                b':' => self.colon()?,
                b',' => self.comma()?,
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                _ => self.primitive()?,
            }
        }

        if let Some(frame) = self.stack.last() {
            return Err(LexError::Incomplete { pos: frame.start });
        }
        Ok(self.next)
    }

    fn invalid(&self) -> LexError {
        LexError::Invalid { pos: self.pos }
    }

    /// Append a token, returning its index
    fn push(&mut self, kind: TokenKind, start: usize, end: usize) -> LexResult<usize> {
        let index = self.next;
        if let Some(out) = self.out.as_deref_mut() {
            let capacity = out.len();
            let slot = out.get_mut(index).ok_or(LexError::NoMem { capacity })?;
            *slot = Token::new(kind, start, end);
        }
        self.next += 1;
        Ok(index)
    }

    fn grow_parent(&mut self, frame: usize) {
        let token = self.stack[frame].token;
        if let Some(tok) = self.out.as_deref_mut().and_then(|out| out.get_mut(token)) {
            tok.size += 1;
        }
    }

    /// Account for a value arriving in the current container
    ///
    /// `may_be_key` is set for strings and, in lenient mode, primitives:
    /// those become keys when the enclosing object awaits one.
    fn attach(&mut self, may_be_key: bool) -> LexResult<()> {
        let Some(top) = self.stack.len().checked_sub(1) else {
            // Top level
            return Ok(());
        };

        let expect = self.stack[top].expect;
        let next = match expect {
            Expect::ArrayValueOrClose | Expect::ArrayValue => {
                self.grow_parent(top);
                Expect::ArrayCommaOrClose
            }
            Expect::ObjectKeyOrClose | Expect::ObjectKey if may_be_key => {
                self.grow_parent(top);
                Expect::ObjectColon
            }
            Expect::ObjectValue => Expect::ObjectCommaOrClose,
            _ if self.strict => return Err(self.invalid()),
            // Lenient: no separators required
            Expect::ArrayCommaOrClose => {
                self.grow_parent(top);
                Expect::ArrayCommaOrClose
            }
            _ if may_be_key => {
                self.grow_parent(top);
                Expect::ObjectColon
            }
            _ => Expect::ObjectCommaOrClose,
        };
        self.stack[top].expect = next;
        Ok(())
    }

    fn open(&mut self, c: u8) -> LexResult<()> {
        self.attach(false)?;
        let (kind, expect) = if c == b'{' {
            (TokenKind::Object, Expect::ObjectKeyOrClose)
        } else {
            (TokenKind::Array, Expect::ArrayValueOrClose)
        };
        let start = self.pos;
        let token = self.push(kind, start, start)?;
        self.stack.push(Frame {
            token,
            start,
            expect,
        });
        self.pos += 1;
        Ok(())
    }

    fn close(&mut self, c: u8) -> LexResult<()> {
        let frame = self.stack.last().copied().ok_or_else(|| self.invalid())?;
        if frame.expect.is_object() != (c == b'}') {
            return Err(self.invalid());
        }
        if self.strict && !frame.expect.may_close() {
            return Err(self.invalid());
        }
        self.stack.pop();

        let end = self.pos + 1;
        if let Some(tok) = self
            .out
            .as_deref_mut()
            .and_then(|out| out.get_mut(frame.token))
        {
            tok.end = end;
        }
        self.pos = end;
        Ok(())
    }

    fn colon(&mut self) -> LexResult<()> {
        let (pos, strict) = (self.pos, self.strict);
        match self.stack.last_mut() {
            Some(frame) if frame.expect == Expect::ObjectColon => {
                frame.expect = Expect::ObjectValue;
            }
            Some(frame) if !strict && frame.expect.is_object() => {
                frame.expect = Expect::ObjectValue;
            }
            _ if strict => return Err(LexError::Invalid { pos }),
            _ => {}
        }
        self.pos += 1;
        Ok(())
    }

    fn comma(&mut self) -> LexResult<()> {
        let (pos, strict) = (self.pos, self.strict);
        match self.stack.last_mut() {
            Some(frame) if frame.expect == Expect::ArrayCommaOrClose => {
                frame.expect = Expect::ArrayValue;
            }
            Some(frame) if frame.expect == Expect::ObjectCommaOrClose => {
                frame.expect = Expect::ObjectKey;
            }
            _ if strict => return Err(LexError::Invalid { pos }),
            Some(frame) => {
                frame.expect = if frame.expect.is_object() {
                    Expect::ObjectKey
                } else {
                    Expect::ArrayValue
                };
            }
            None => {}
        }
        self.pos += 1;
        Ok(())
    }

    fn string(&mut self) -> LexResult<()> {
        let open = self.pos;
        let start = open + 1;
        let mut i = start;

        let end = loop {
            let c = *self
                .src
                .get(i)
                .ok_or(LexError::Incomplete { pos: open })?;
            match c {
                b'"' => break i,
                b'\\' => {
                    i += 1;
                    let e = *self
                        .src
                        .get(i)
                        .ok_or(LexError::Incomplete { pos: open })?;
                    match e {
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'r' | b'n' | b't' => i += 1,
                        b'u' => {
                            for k in 1..=4 {
                                let h = *self
                                    .src
                                    .get(i + k)
                                    .ok_or(LexError::Incomplete { pos: open })?;
                                if !h.is_ascii_hexdigit() {
                                    return Err(LexError::Invalid { pos: i + k });
                                }
                            }
                            i += 5;
                        }
                        _ => return Err(LexError::Invalid { pos: i }),
                    }
                }
                c if self.strict && c < 0x20 => return Err(LexError::Invalid { pos: i }),
                _ => i += 1,
            }
        };

        if self.strict {
            if let Err(e) = std::str::from_utf8(&self.src[start..end]) {
                return Err(LexError::Invalid {
                    pos: start + e.valid_up_to(),
                });
            }
        }

        self.attach(true)?;
        self.push(TokenKind::String, start, end)?;
        self.pos = end + 1;
        Ok(())
    }

    fn primitive(&mut self) -> LexResult<()> {
        let start = self.pos;
        let mut i = start;

        let end = loop {
            let Some(&c) = self.src.get(i) else {
                if self.strict {
                    return Err(LexError::Incomplete { pos: start });
                }
                break i;
            };
            match c {
                b' ' | b'\t' | b'\r' | b'\n' | b',' | b']' | b'}' => break i,
                b':' if !self.strict => break i,
                c if !(32..127).contains(&c) => return Err(LexError::Invalid { pos: i }),
                _ => i += 1,
            }
        };

        if self.strict && !is_json_literal(&self.src[start..end]) {
            return Err(LexError::Invalid { pos: start });
        }

        self.attach(!self.strict)?;
        self.push(TokenKind::Primitive, start, end)?;
        self.pos = end;
        Ok(())
    }
}

/// `true`, `false`, `null` or a JSON number
fn is_json_literal(text: &[u8]) -> bool {
    matches!(text, b"true" | b"false" | b"null") || is_json_number(text)
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_json_number(text: &[u8]) -> bool {
    fn digits(s: &[u8]) -> usize {
        s.iter().take_while(|c| c.is_ascii_digit()).count()
    }

    let mut s = text.strip_prefix(b"-").unwrap_or(text);

    match s.first() {
        Some(b'0') => s = &s[1..],
        Some(b'1'..=b'9') => s = &s[digits(s)..],
        _ => return false,
    }

    if let Some(rest) = s.strip_prefix(b".") {
        let n = digits(rest);
        if n == 0 {
            return false;
        }
        s = &rest[n..];
    }

    if let Some(rest) = s.strip_prefix(b"e").or_else(|| s.strip_prefix(b"E")) {
        let rest = rest
            .strip_prefix(b"+")
            .or_else(|| rest.strip_prefix(b"-"))
            .unwrap_or(rest);
        let n = digits(rest);
        if n == 0 {
            return false;
        }
        s = &rest[n..];
    }

    s.is_empty()
}
