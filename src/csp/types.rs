//! CSP instance types
//!
//! A [`Csp`] owns everything it describes. Nothing is shared between
//! instances and dropping the instance releases the whole tree.

use std::fmt;

use crate::tuples::IntTuples;

/// Instance metadata
///
/// `id` and `algo` hold the text between the quotes exactly as written,
/// escapes intact. `params_json` holds the raw text of an arbitrary JSON
/// value and is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub id: String,
    pub algo: String,
    pub params_json: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            id: String::new(),
            algo: String::new(),
            params_json: "null".to_string(),
        }
    }
}

impl Meta {
    pub fn new(
        id: impl Into<String>,
        algo: impl Into<String>,
        params_json: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            algo: algo.into(),
            params_json: params_json.into(),
        }
    }
}

/// The legal values of a variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain {
    /// Explicitly enumerated values, a flat list
    Values(IntTuples),
}

impl Domain {
    /// JSON key naming this encoding
    pub fn key(&self) -> &'static str {
        match self {
            Domain::Values(_) => "values",
        }
    }

    /// The payload tuples of this domain
    pub fn tuples(&self) -> &IntTuples {
        match self {
            Domain::Values(values) => values,
        }
    }
}

/// `{"values": [0, 1]}`
impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"{}\": {}}}", self.key(), self.tuples())
    }
}

/// A reusable relation that constraints instantiate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintDef {
    /// Forbidden value combinations, one fixed-width tuple each
    NoGoods(IntTuples),
}

impl ConstraintDef {
    pub fn key(&self) -> &'static str {
        match self {
            ConstraintDef::NoGoods(_) => "noGoods",
        }
    }

    pub fn tuples(&self) -> &IntTuples {
        match self {
            ConstraintDef::NoGoods(no_goods) => no_goods,
        }
    }
}

/// `{"noGoods": [[0, 0], [1, 1]]}`
impl fmt::Display for ConstraintDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"{}\": {}}}", self.key(), self.tuples())
    }
}

/// A constraint definition applied to an ordered list of variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Index into `Csp::constraint_defs`
    pub id: i32,
    /// Indices into `Csp::vars`
    pub vars: IntTuples,
}

impl Constraint {
    pub fn new(id: i32, vars: Vec<i32>) -> Self {
        Self {
            id,
            vars: IntTuples::flat(vars),
        }
    }
}

/// `{"id": 0, "vars": [0, 1]}`
impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"id\": {}, \"vars\": {}}}", self.id, self.vars)
    }
}

/// A constraint-satisfaction problem instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Csp {
    pub meta: Meta,
    pub domains: Vec<Domain>,
    /// `vars[i]` is the index of variable `i`'s domain
    pub vars: IntTuples,
    pub constraint_defs: Vec<ConstraintDef>,
    pub constraints: Vec<Constraint>,
}

impl Csp {
    /// Number of variables
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Domain of variable `var`, if both the variable and its domain exist
    pub fn domain_of(&self, var: usize) -> Option<&Domain> {
        let index = usize::try_from(self.vars.get(var)?).ok()?;
        self.domains.get(index)
    }

    /// Definition a constraint refers to
    pub fn def_of(&self, constraint: &Constraint) -> Option<&ConstraintDef> {
        let index = usize::try_from(constraint.id).ok()?;
        self.constraint_defs.get(index)
    }
}
