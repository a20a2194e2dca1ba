//! CSP instances
//!
//! Types for constraint-satisfaction problem instances and the three
//! operations on their textual form:
//!
//! - [`decode`]: text to [`Csp`], checking the closed schema
//! - [`validate`]: cross-reference checks on a decoded instance
//! - [`print`]: [`Csp`] to canonical text
//!
//! ```ignore
//! let csp = csp_json::csp::decode(&text)?;
//! csp.validate()?;
//! assert_eq!(csp_json::csp::print(&csp), text);
//! ```

mod decoder;
mod printer;
mod types;
mod validator;

pub use decoder::{decode, decode_constraint_def, decode_domain, decode_with};
pub use printer::{print, print_to};
pub use types::{Constraint, ConstraintDef, Csp, Domain, Meta};
pub use validator::{validate, validate_with};
