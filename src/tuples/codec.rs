//! Tuple codec
//!
//! Decodes an [`IntTuples`] from a token array by inferring its shape:
//! an array of integers is flat, an array of equal-width integer arrays is
//! two-dimensional. Encoding is the `Display` implementation.

use crate::config::CodecConfig;
use crate::errors::{CjError, CjErrorCode, CjResult};
use crate::token::{token_at, tokenize_with, Token, TokenKind};

use super::types::{IntTuples, FLAT};

fn item_type(msg: impl Into<String>) -> CjError {
    CjError::new(CjErrorCode::IntTuplesItemType, msg)
}

fn check_default_arity(default_arity: i32) -> CjResult<()> {
    if default_arity < FLAT {
        return Err(CjError::arg(format!(
            "Invalid default arity {}",
            default_arity
        )));
    }
    Ok(())
}

/// Decode the array at `tokens[cursor]`
///
/// Returns the tuples and the number of tokens consumed, the array token
/// included. An empty array yields `size == 0` with `default_arity`,
/// which must be `-1` or more.
pub fn decode_tokens(
    src: &[u8],
    tokens: &[Token],
    cursor: usize,
    default_arity: i32,
) -> CjResult<(IntTuples, usize)> {
    check_default_arity(default_arity)?;

    let head = token_at(tokens, cursor)?;
    if head.kind != TokenKind::Array {
        return Err(CjError::new(
            CjErrorCode::IsNotArray,
            format!("Expected an array, found {}", head.kind),
        ));
    }

    let size = head.size;
    if size == 0 {
        return Ok((IntTuples::empty(default_arity), 1));
    }

    let first = token_at(tokens, cursor + 1)?;
    match first.kind {
        TokenKind::Array => decode_rows(src, tokens, cursor, size, first.size),
        TokenKind::Primitive if first.is_int_literal(src) => {
            decode_flat(src, tokens, cursor, size)
        }
        _ => Err(item_type(format!(
            "First item is a {}, expected an integer or an array",
            first.kind
        ))),
    }
}

/// `[a, b, ...]`
fn decode_flat(
    src: &[u8],
    tokens: &[Token],
    cursor: usize,
    size: usize,
) -> CjResult<(IntTuples, usize)> {
    let mut data = Vec::with_capacity(size);
    for i in 0..size {
        data.push(int_at(src, tokens, cursor + 1 + i, i)?);
    }
    Ok((IntTuples::flat(data), 1 + size))
}

/// `[[a, b], [c, d], ...]`, every row as wide as the first
fn decode_rows(
    src: &[u8],
    tokens: &[Token],
    cursor: usize,
    size: usize,
    width: usize,
) -> CjResult<(IntTuples, usize)> {
    let arity =
        i32::try_from(width).map_err(|_| item_type(format!("Tuple width {} too large", width)))?;

    let mut data = Vec::with_capacity(size.saturating_mul(width));
    let mut idx = cursor + 1;
    for row in 0..size {
        let tok = token_at(tokens, idx)?;
        if tok.kind != TokenKind::Array {
            return Err(item_type(format!(
                "Item {} is a {}, expected an array",
                row, tok.kind
            )));
        }
        if tok.size != width {
            return Err(item_type(format!(
                "Item {} has width {}, expected {}",
                row, tok.size, width
            )));
        }
        for col in 0..width {
            data.push(int_at(src, tokens, idx + 1 + col, col)?);
        }
        idx += 1 + width;
    }

    Ok((
        IntTuples {
            size,
            arity,
            data,
        },
        idx - cursor,
    ))
}

fn int_at(src: &[u8], tokens: &[Token], index: usize, item: usize) -> CjResult<i32> {
    let tok = token_at(tokens, index)?;
    tok.as_i32(src).ok_or_else(|| {
        item_type(format!(
            "Item {} is not a 32-bit integer: {}",
            item,
            String::from_utf8_lossy(tok.raw(src))
        ))
    })
}

/// Parse a bare tuple array with the default configuration
pub fn parse_tuples(default_arity: i32, text: &str) -> CjResult<IntTuples> {
    parse_tuples_with(default_arity, text, &CodecConfig::default())
}

/// Parse a bare tuple array
///
/// The whole text must be exactly one array.
pub fn parse_tuples_with(
    default_arity: i32,
    text: &str,
    config: &CodecConfig,
) -> CjResult<IntTuples> {
    check_default_arity(default_arity)?;

    let src = text.as_bytes();
    let logger = config.logger();
    let tokens = tokenize_with(src, config, &logger)?;
    if tokens.is_empty() {
        return Err(CjError::arg("Empty document"));
    }

    let (tuples, consumed) = decode_tokens(src, &tokens, 0, default_arity)?;
    if consumed != tokens.len() {
        return Err(CjError::new(
            CjErrorCode::TrailingContent,
            format!("{} tokens after the array", tokens.len() - consumed),
        ));
    }
    Ok(tuples)
}
