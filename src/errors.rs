//! Error types for the CSP-JSON codec
//!
//! Every failure is one `CjErrorCode` in a single flat, signed code space:
//! zero is success (represented as `Ok`), every error is negative and unique.
//!
//! Categories:
//! - Misuse (programmer errors, checked first)
//! - Lexical (wrapped tokenizer failures)
//! - Schema (shape violations found while decoding)
//! - Validation (cross-reference and range invariants)
//!
//! Numeric values are part of the interchange contract and never change.
//! Retired values (-4, -5, -6, -8, -24, -25) are not reused.

use std::fmt;

/// Category of a `CjErrorCode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller passed an argument the API does not accept
    Misuse,
    /// Raw text is not well-formed
    Lexical,
    /// Well-formed text does not match the CSP-JSON schema
    Schema,
    /// Decoded instance violates a cross-reference or range invariant
    Validation,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Misuse => "MISUSE",
            ErrorCategory::Lexical => "LEXICAL",
            ErrorCategory::Schema => "SCHEMA",
            ErrorCategory::Validation => "VALIDATION",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All error codes of the codec, with their stable numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CjErrorCode {
    // Lexical
    /// Not enough tokens were provided
    JsmnNoMem = -1,
    /// Invalid character, escape or bracket
    JsmnInval = -2,
    /// The text is not a full JSON value, more bytes expected
    JsmnPart = -3,

    // Misuse
    /// The provided argument is out of range or empty
    Arg = -7,

    // Schema: meta
    /// csp-json.meta is not an object
    MetaIsNotObject = -9,
    /// csp-json.meta.id is not a string
    MetaIdNotString = -10,
    /// csp-json.meta.algo is not a string
    MetaAlgoNotString = -11,
    /// csp-json.meta has a field that is not recognized
    MetaUnknownField = -12,

    // Schema: domains
    /// csp-json.domains is not an array
    DomainsIsNotArray = -13,
    /// csp-json.domains[i] is not an object
    DomainIsNotObject = -14,
    /// csp-json.domains[i] has an unknown type (only "values" is known)
    DomainUnknownType = -15,
    /// csp-json.domains[i].values is not an array
    DomainValuesIsNotArray = -16,
    /// csp-json.domains[i].values is not a flat list of integers
    DomainValuesIsNotInt = -17,

    // Schema: vars
    /// csp-json.vars is not an array
    VarsIsNotArray = -18,
    /// csp-json.vars is not a flat list of integers
    VarIsNotInt = -19,

    // Schema: constraintDefs
    /// csp-json.constraintDefs is not an array
    ConstraintDefsIsNotArray = -20,
    /// csp-json.constraintDefs[i] has an unknown type (only "noGoods" is known)
    ConstraintDefUnknownType = -21,
    /// csp-json.constraintDefs[i].noGoods is not an array
    NoGoodsIsNotArray = -22,
    /// csp-json.constraintDefs[i].noGoods is not a list of tuples
    NoGoodsArrayHasNotATuple = -23,

    // Schema: constraints
    /// csp-json.constraints is not an array
    ConstraintsIsNotArray = -26,
    /// csp-json.constraints[i] is not an object
    ConstraintIsNotObject = -27,
    /// csp-json.constraints[i].id is not an integer
    ConstraintIdIsNotInt = -28,
    /// csp-json.constraints[i].vars is not an array
    ConstraintVarsIsNotArray = -29,
    /// csp-json.constraints[i].vars is not a flat list of integers
    ConstraintVarIsNotInt = -30,
    /// csp-json.constraints[i] has a field that is not recognized
    ConstraintUnknownField = -31,

    // Schema: top level
    /// The top-level value is not an object
    CspJsonIsNotObject = -32,
    /// The top-level object is missing fields or has extra ones
    CspJsonBadFieldCount = -33,
    /// The top-level object has a field that is not recognized
    CspJsonUnknownField = -34,

    // Schema: tuples
    /// A tuple container item is not an integer or tuple, or is inconsistent
    IntTuplesItemType = -35,
    /// Expected an array, got something else
    IsNotArray = -36,

    // Validation
    DomainsSize = -37,
    DomainsType = -38,
    VarsArity = -39,
    VarsSize = -40,
    VarRange = -41,
    ConstraintDefsSize = -42,
    ConstraintDefType = -43,
    ConstraintsSize = -44,
    ConstraintIdRange = -45,
    ConstraintVarsArity = -46,
    ConstraintVarsSize = -47,
    ConstraintVarRange = -48,

    // Schema: field counts and keys
    /// csp-json.meta does not have exactly 3 fields
    MetaBadFieldCount = -49,
    /// csp-json.domains[i] does not have exactly 1 field
    DomainBadFieldCount = -50,
    /// csp-json.constraintDefs[i] is not an object
    ConstraintDefIsNotObject = -51,
    /// csp-json.constraintDefs[i] does not have exactly 1 field
    ConstraintDefBadFieldCount = -52,
    /// csp-json.constraints[i] does not have exactly 2 fields
    ConstraintBadFieldCount = -53,
    /// A key appears twice in one object
    DuplicateField = -54,
    /// Tokens remain after the top-level value
    TrailingContent = -55,
}

impl CjErrorCode {
    /// Every code, ordered by descending numeric value
    pub const ALL: [CjErrorCode; 49] = [
        CjErrorCode::JsmnNoMem,
        CjErrorCode::JsmnInval,
        CjErrorCode::JsmnPart,
        CjErrorCode::Arg,
        CjErrorCode::MetaIsNotObject,
        CjErrorCode::MetaIdNotString,
        CjErrorCode::MetaAlgoNotString,
        CjErrorCode::MetaUnknownField,
        CjErrorCode::DomainsIsNotArray,
        CjErrorCode::DomainIsNotObject,
        CjErrorCode::DomainUnknownType,
        CjErrorCode::DomainValuesIsNotArray,
        CjErrorCode::DomainValuesIsNotInt,
        CjErrorCode::VarsIsNotArray,
        CjErrorCode::VarIsNotInt,
        CjErrorCode::ConstraintDefsIsNotArray,
        CjErrorCode::ConstraintDefUnknownType,
        CjErrorCode::NoGoodsIsNotArray,
        CjErrorCode::NoGoodsArrayHasNotATuple,
        CjErrorCode::ConstraintsIsNotArray,
        CjErrorCode::ConstraintIsNotObject,
        CjErrorCode::ConstraintIdIsNotInt,
        CjErrorCode::ConstraintVarsIsNotArray,
        CjErrorCode::ConstraintVarIsNotInt,
        CjErrorCode::ConstraintUnknownField,
        CjErrorCode::CspJsonIsNotObject,
        CjErrorCode::CspJsonBadFieldCount,
        CjErrorCode::CspJsonUnknownField,
        CjErrorCode::IntTuplesItemType,
        CjErrorCode::IsNotArray,
        CjErrorCode::DomainsSize,
        CjErrorCode::DomainsType,
        CjErrorCode::VarsArity,
        CjErrorCode::VarsSize,
        CjErrorCode::VarRange,
        CjErrorCode::ConstraintDefsSize,
        CjErrorCode::ConstraintDefType,
        CjErrorCode::ConstraintsSize,
        CjErrorCode::ConstraintIdRange,
        CjErrorCode::ConstraintVarsArity,
        CjErrorCode::ConstraintVarsSize,
        CjErrorCode::ConstraintVarRange,
        CjErrorCode::MetaBadFieldCount,
        CjErrorCode::DomainBadFieldCount,
        CjErrorCode::ConstraintDefIsNotObject,
        CjErrorCode::ConstraintDefBadFieldCount,
        CjErrorCode::ConstraintBadFieldCount,
        CjErrorCode::DuplicateField,
        CjErrorCode::TrailingContent,
    ];

    /// Returns the signed numeric value of this code
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Looks a code up by its numeric value
    pub fn from_value(value: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.value() == value)
    }

    /// Returns the stable string form of this code
    pub fn code(&self) -> &'static str {
        match self {
            CjErrorCode::JsmnNoMem => "CJ_ERROR_JSMN_NOMEM",
            CjErrorCode::JsmnInval => "CJ_ERROR_JSMN_INVAL",
            CjErrorCode::JsmnPart => "CJ_ERROR_JSMN_PART",
            CjErrorCode::Arg => "CJ_ERROR_ARG",
            CjErrorCode::MetaIsNotObject => "CJ_ERROR_META_IS_NOT_OBJECT",
            CjErrorCode::MetaIdNotString => "CJ_ERROR_META_ID_NOT_STRING",
            CjErrorCode::MetaAlgoNotString => "CJ_ERROR_META_ALGO_NOT_STRING",
            CjErrorCode::MetaUnknownField => "CJ_ERROR_META_UNKNOWN_FIELD",
            CjErrorCode::DomainsIsNotArray => "CJ_ERROR_DOMAINS_IS_NOT_ARRAY",
            CjErrorCode::DomainIsNotObject => "CJ_ERROR_DOMAIN_IS_NOT_OBJECT",
            CjErrorCode::DomainUnknownType => "CJ_ERROR_DOMAIN_UNKNOWN_TYPE",
            CjErrorCode::DomainValuesIsNotArray => "CJ_ERROR_DOMAIN_VALUES_IS_NOT_ARRAY",
            CjErrorCode::DomainValuesIsNotInt => "CJ_ERROR_DOMAIN_VALUES_IS_NOT_INT",
            CjErrorCode::VarsIsNotArray => "CJ_ERROR_VARS_IS_NOT_ARRAY",
            CjErrorCode::VarIsNotInt => "CJ_ERROR_VAR_IS_NOT_INT",
            CjErrorCode::ConstraintDefsIsNotArray => "CJ_ERROR_CONSTRAINTDEFS_IS_NOT_ARRAY",
            CjErrorCode::ConstraintDefUnknownType => "CJ_ERROR_CONSTRAINTDEF_UNKNOWN_TYPE",
            CjErrorCode::NoGoodsIsNotArray => "CJ_ERROR_NOGOODS_IS_NOT_ARRAY",
            CjErrorCode::NoGoodsArrayHasNotATuple => "CJ_ERROR_NOGOODS_ARRAY_HAS_NOT_A_TUPLE",
            CjErrorCode::ConstraintsIsNotArray => "CJ_ERROR_CONSTRAINTS_IS_NOT_ARRAY",
            CjErrorCode::ConstraintIsNotObject => "CJ_ERROR_CONSTRAINT_IS_NOT_OBJECT",
            CjErrorCode::ConstraintIdIsNotInt => "CJ_ERROR_CONSTRAINT_ID_IS_NOT_INT",
            CjErrorCode::ConstraintVarsIsNotArray => "CJ_ERROR_CONSTRAINT_VARS_IS_NOT_ARRAY",
            CjErrorCode::ConstraintVarIsNotInt => "CJ_ERROR_CONSTRAINT_VAR_IS_NOT_INT",
            CjErrorCode::ConstraintUnknownField => "CJ_ERROR_CONSTRAINT_UNKNOWN_FIELD",
            CjErrorCode::CspJsonIsNotObject => "CJ_ERROR_CSPJSON_IS_NOT_OBJECT",
            CjErrorCode::CspJsonBadFieldCount => "CJ_ERROR_CSPJSON_BAD_FIELD_COUNT",
            CjErrorCode::CspJsonUnknownField => "CJ_ERROR_CSPJSON_UNKNOWN_FIELD",
            CjErrorCode::IntTuplesItemType => "CJ_ERROR_INTTUPLES_ITEM_TYPE",
            CjErrorCode::IsNotArray => "CJ_ERROR_IS_NOT_ARRAY",
            CjErrorCode::DomainsSize => "CJ_ERROR_VALIDATION_DOMAINS_SIZE",
            CjErrorCode::DomainsType => "CJ_ERROR_VALIDATION_DOMAINS_TYPE",
            CjErrorCode::VarsArity => "CJ_ERROR_VALIDATION_VARS_ARITY",
            CjErrorCode::VarsSize => "CJ_ERROR_VALIDATION_VARS_SIZE",
            CjErrorCode::VarRange => "CJ_ERROR_VALIDATION_VAR_RANGE",
            CjErrorCode::ConstraintDefsSize => "CJ_ERROR_VALIDATION_CONSTRAINTDEFS_SIZE",
            CjErrorCode::ConstraintDefType => "CJ_ERROR_VALIDATION_CONSTRAINTDEF_TYPE",
            CjErrorCode::ConstraintsSize => "CJ_ERROR_VALIDATION_CONSTRAINTS_SIZE",
            CjErrorCode::ConstraintIdRange => "CJ_ERROR_VALIDATION_CONSTRAINT_ID_RANGE",
            CjErrorCode::ConstraintVarsArity => "CJ_ERROR_VALIDATION_CONSTRAINT_VARS_ARITY",
            CjErrorCode::ConstraintVarsSize => "CJ_ERROR_VALIDATION_CONSTRAINT_VARS_SIZE",
            CjErrorCode::ConstraintVarRange => "CJ_ERROR_VALIDATION_CONSTRAINT_VAR_RANGE",
            CjErrorCode::MetaBadFieldCount => "CJ_ERROR_META_BAD_FIELD_COUNT",
            CjErrorCode::DomainBadFieldCount => "CJ_ERROR_DOMAIN_BAD_FIELD_COUNT",
            CjErrorCode::ConstraintDefIsNotObject => "CJ_ERROR_CONSTRAINTDEF_IS_NOT_OBJECT",
            CjErrorCode::ConstraintDefBadFieldCount => "CJ_ERROR_CONSTRAINTDEF_BAD_FIELD_COUNT",
            CjErrorCode::ConstraintBadFieldCount => "CJ_ERROR_CONSTRAINT_BAD_FIELD_COUNT",
            CjErrorCode::DuplicateField => "CJ_ERROR_DUPLICATE_FIELD",
            CjErrorCode::TrailingContent => "CJ_ERROR_TRAILING_CONTENT",
        }
    }

    /// Returns the category this code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self.value() {
            -3..=-1 => ErrorCategory::Lexical,
            -7 => ErrorCategory::Misuse,
            -48..=-37 => ErrorCategory::Validation,
            _ => ErrorCategory::Schema,
        }
    }
}

impl fmt::Display for CjErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Codec error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CjError {
    code: CjErrorCode,
    message: String,
    /// Field path of the offending node, e.g. `constraints[3].vars`
    path: Option<String>,
}

impl CjError {
    /// Create an error with a code and message
    pub fn new(code: CjErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Create an error located at a field path
    pub fn at(code: CjErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a misuse error
    pub fn arg(message: impl Into<String>) -> Self {
        Self::new(CjErrorCode::Arg, message)
    }

    /// Returns the error code
    pub fn code(&self) -> CjErrorCode {
        self.code
    }

    /// Returns the signed numeric value of the error code
    pub fn value(&self) -> i32 {
        self.code.value()
    }

    /// Returns the error category
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Returns the human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the field path, if known
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns a copy of this error located at `path` unless it already has one
    pub fn or_at(mut self, path: impl Into<String>) -> Self {
        if self.path.is_none() {
            self.path = Some(path.into());
        }
        self
    }
}

impl fmt::Display for CjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " (at {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for CjError {}

/// Result type for codec operations
pub type CjResult<T> = Result<T, CjError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_negative_and_unique() {
        let mut seen = HashSet::new();
        for code in CjErrorCode::ALL.iter() {
            assert!(code.value() < 0, "{} is not negative", code);
            assert!(seen.insert(code.value()), "{} is duplicated", code);
        }
        assert_eq!(seen.len(), 49);
    }

    #[test]
    fn test_code_strings_are_unique() {
        let strings: HashSet<_> = CjErrorCode::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(strings.len(), CjErrorCode::ALL.len());
    }

    #[test]
    fn test_inherited_values_are_stable() {
        assert_eq!(CjErrorCode::JsmnNoMem.value(), -1);
        assert_eq!(CjErrorCode::Arg.value(), -7);
        assert_eq!(CjErrorCode::MetaIsNotObject.value(), -9);
        assert_eq!(CjErrorCode::CspJsonBadFieldCount.value(), -33);
        assert_eq!(CjErrorCode::IntTuplesItemType.value(), -35);
        assert_eq!(CjErrorCode::ConstraintVarRange.value(), -48);
    }

    #[test]
    fn test_from_value() {
        for code in CjErrorCode::ALL {
            assert_eq!(CjErrorCode::from_value(code.value()), Some(code));
        }
        assert_eq!(CjErrorCode::from_value(-55), Some(CjErrorCode::TrailingContent));
        assert_eq!(CjErrorCode::from_value(0), None);
        assert_eq!(CjErrorCode::from_value(-4), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(CjErrorCode::JsmnPart.category(), ErrorCategory::Lexical);
        assert_eq!(CjErrorCode::Arg.category(), ErrorCategory::Misuse);
        assert_eq!(CjErrorCode::MetaUnknownField.category(), ErrorCategory::Schema);
        assert_eq!(CjErrorCode::IsNotArray.category(), ErrorCategory::Schema);
        assert_eq!(CjErrorCode::VarRange.category(), ErrorCategory::Validation);
        assert_eq!(CjErrorCode::DuplicateField.category(), ErrorCategory::Schema);
        assert_eq!(CjErrorCode::TrailingContent.category(), ErrorCategory::Schema);
    }

    #[test]
    fn test_error_display_includes_path() {
        let err = CjError::at(CjErrorCode::VarIsNotInt, "vars", "expected a flat list");
        let display = format!("{}", err);
        assert!(display.starts_with("CJ_ERROR_VAR_IS_NOT_INT"));
        assert!(display.contains("(at vars)"));
    }

    #[test]
    fn test_or_at_keeps_innermost_path() {
        let err = CjError::at(CjErrorCode::IntTuplesItemType, "vars[2]", "not an integer")
            .or_at("vars");
        assert_eq!(err.path(), Some("vars[2]"));

        let err = CjError::new(CjErrorCode::IsNotArray, "x").or_at("vars");
        assert_eq!(err.path(), Some("vars"));
    }
}
