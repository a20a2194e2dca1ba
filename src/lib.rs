//! csp-json - A strict codec for CSP-JSON constraint satisfaction instances
//!
//! Decodes instance text into typed values, validates their cross
//! references and prints them back in one canonical layout.

pub mod cli;
pub mod config;
pub mod csp;
pub mod errors;
pub mod observability;
pub mod token;
pub mod tuples;

pub use config::{CodecConfig, LexMode, LogLevel};
pub use csp::{decode, decode_with, print, print_to, validate, Constraint, ConstraintDef, Csp, Domain, Meta};
pub use errors::{CjError, CjErrorCode, CjResult};
pub use token::{tokenize, Token, TokenKind, Tokenizer};
pub use tuples::{parse_tuples, IntTuples, FLAT};
