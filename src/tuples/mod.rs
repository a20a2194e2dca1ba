//! Integer tuples
//!
//! The numeric container behind domains, variables, nogoods and constraint
//! scopes, and its codec.

mod codec;
mod types;

pub use codec::{decode_tokens, parse_tuples, parse_tuples_with};
pub use types::{IntTuples, FLAT};
