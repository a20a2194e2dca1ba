//! Cross-reference validation
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. domains: count and encoding payloads
//! 2. vars: arity, size, every entry indexes a domain
//! 3. constraintDefs: count and encoding payloads
//! 4. constraints: id indexes a definition, vars arity and size, every
//!    entry indexes a variable
//!
//! Validation never mutates the instance.

use crate::errors::{CjError, CjErrorCode, CjResult};
use crate::observability::{log_error, log_event_with_fields, Event, Logger};
use crate::tuples::IntTuples;

use super::types::{ConstraintDef, Csp, Domain};

/// Validate an instance
///
/// # Errors
///
/// Returns the validation code of the first rule the instance breaks.
pub fn validate(csp: &Csp) -> CjResult<()> {
    validate_domains(csp)?;
    validate_vars(csp)?;
    validate_constraint_defs(csp)?;
    validate_constraints(csp)
}

/// Validate an instance, logging the outcome
pub fn validate_with(csp: &Csp, logger: &Logger) -> CjResult<()> {
    let result = validate(csp);
    match &result {
        Ok(()) => log_event_with_fields(
            logger,
            Event::ValidateComplete,
            &[
                ("vars", &csp.vars.len().to_string()),
                ("constraints", &csp.constraints.len().to_string()),
            ],
        ),
        Err(e) => log_error(logger, Event::ValidateFailed, e),
    }
    result
}

impl Csp {
    /// See [`validate`]
    pub fn validate(&self) -> CjResult<()> {
        validate(self)
    }
}

/// Count must be addressable by a 32-bit index
fn check_count(len: usize, code: CjErrorCode, path: &str) -> CjResult<()> {
    if i32::try_from(len).is_err() {
        return Err(CjError::at(
            code,
            path,
            format!("{} entries exceed the 32-bit index range", len),
        ));
    }
    Ok(())
}

/// Flat list whose storage matches its size
fn check_flat(
    ts: &IntTuples,
    path: &str,
    arity_code: CjErrorCode,
    size_code: CjErrorCode,
) -> CjResult<()> {
    if !ts.is_flat() {
        return Err(CjError::at(
            arity_code,
            path,
            format!("Expected arity -1, found {}", ts.arity),
        ));
    }
    if !ts.is_consistent() || i32::try_from(ts.size).is_err() {
        return Err(CjError::at(
            size_code,
            path,
            format!("Size {} does not match {} stored values", ts.size, ts.data.len()),
        ));
    }
    Ok(())
}

/// Every entry of a flat list must be in `[0, bound)`
fn check_range(ts: &IntTuples, bound: usize, path: &str, code: CjErrorCode) -> CjResult<()> {
    for (i, &v) in ts.data.iter().enumerate() {
        let in_range = usize::try_from(v).map_or(false, |v| v < bound);
        if !in_range {
            return Err(CjError::at(
                code,
                format!("{}[{}]", path, i),
                format!("{} is outside [0, {})", v, bound),
            ));
        }
    }
    Ok(())
}

fn validate_domains(csp: &Csp) -> CjResult<()> {
    check_count(csp.domains.len(), CjErrorCode::DomainsSize, "domains")?;

    for (i, domain) in csp.domains.iter().enumerate() {
        match domain {
            Domain::Values(values) => {
                if !values.is_flat() {
                    return Err(CjError::at(
                        CjErrorCode::DomainsType,
                        format!("domains[{}].values", i),
                        format!("Expected arity -1, found {}", values.arity),
                    ));
                }
            }
        }
    }
    Ok(())
}

fn validate_vars(csp: &Csp) -> CjResult<()> {
    check_flat(
        &csp.vars,
        "vars",
        CjErrorCode::VarsArity,
        CjErrorCode::VarsSize,
    )?;
    check_range(&csp.vars, csp.domains.len(), "vars", CjErrorCode::VarRange)
}

fn validate_constraint_defs(csp: &Csp) -> CjResult<()> {
    check_count(
        csp.constraint_defs.len(),
        CjErrorCode::ConstraintDefsSize,
        "constraintDefs",
    )?;

    for (i, def) in csp.constraint_defs.iter().enumerate() {
        match def {
            ConstraintDef::NoGoods(no_goods) => {
                if no_goods.arity < 0 || !no_goods.is_consistent() {
                    return Err(CjError::at(
                        CjErrorCode::ConstraintDefType,
                        format!("constraintDefs[{}].noGoods", i),
                        format!(
                            "Expected tuples, found arity {} with {} stored values",
                            no_goods.arity,
                            no_goods.data.len()
                        ),
                    ));
                }
            }
        }
    }
    Ok(())
}

fn validate_constraints(csp: &Csp) -> CjResult<()> {
    check_count(
        csp.constraints.len(),
        CjErrorCode::ConstraintsSize,
        "constraints",
    )?;

    let defs = csp.constraint_defs.len();
    for (i, constraint) in csp.constraints.iter().enumerate() {
        let path = format!("constraints[{}]", i);

        let id_in_range = usize::try_from(constraint.id).map_or(false, |id| id < defs);
        if !id_in_range {
            return Err(CjError::at(
                CjErrorCode::ConstraintIdRange,
                format!("{}.id", path),
                format!("{} is outside [0, {})", constraint.id, defs),
            ));
        }

        let vars_path = format!("{}.vars", path);
        check_flat(
            &constraint.vars,
            &vars_path,
            CjErrorCode::ConstraintVarsArity,
            CjErrorCode::ConstraintVarsSize,
        )?;
        check_range(
            &constraint.vars,
            csp.vars.len(),
            &vars_path,
            CjErrorCode::ConstraintVarRange,
        )?;
    }
    Ok(())
}
