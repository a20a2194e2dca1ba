//! Lexical layer
//!
//! Splits raw text into a flat sequence of [`Token`]s. Schema decoding works
//! directly over this sequence by index arithmetic.

mod errors;
mod tokenizer;
mod types;

pub use errors::{LexError, LexResult};
pub use tokenizer::{tokenize, Tokenizer};
pub use types::{Token, TokenKind};

use crate::config::CodecConfig;
use crate::errors::{CjError, CjErrorCode, CjResult};
use crate::observability::{log_event_with_fields, Event, Logger};

/// Tokenize `src` under `config`, enforcing its token limit
///
/// The limit is checked between the count and fill passes, so an oversized
/// document is refused before its token buffer is allocated.
pub fn tokenize_with(src: &[u8], config: &CodecConfig, logger: &Logger) -> CjResult<Vec<Token>> {
    let tokenizer = Tokenizer::new(config.lex_mode);
    let count = tokenizer.count(src)?;

    if config.max_tokens > 0 && count > config.max_tokens {
        return Err(CjError::new(
            CjErrorCode::JsmnNoMem,
            format!(
                "Document needs {} tokens, limit is {}",
                count, config.max_tokens
            ),
        ));
    }

    let mut tokens = vec![Token::default(); count];
    let filled = tokenizer.parse(src, Some(&mut tokens))?;
    tokens.truncate(filled);

    log_event_with_fields(
        logger,
        Event::TokenizeComplete,
        &[
            ("bytes", &src.len().to_string()),
            ("mode", config.lex_mode.as_str()),
            ("tokens", &filled.to_string()),
        ],
    );

    Ok(tokens)
}

/// Bounds-checked token access for decoders
///
/// A token stream that ends early can only come from lenient input, where
/// container sizes are not backed by grammar; it is reported as incomplete.
pub fn token_at(tokens: &[Token], index: usize) -> CjResult<&Token> {
    tokens.get(index).ok_or_else(|| {
        CjError::new(
            CjErrorCode::JsmnPart,
            format!("Token stream ends at {}, expected more", tokens.len()),
        )
    })
}
