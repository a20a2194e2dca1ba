//! Integer tuple container

use std::fmt;

use crate::errors::{CjError, CjResult};

/// Arity marking a flat list of scalars
pub const FLAT: i32 = -1;

/// A homogeneous list of integers or of fixed-width integer tuples
///
/// `arity == -1` is a flat list of `size` integers. `arity >= 0` is a list of
/// `size` tuples of width `arity`, stored row-major in `data`. Note that
/// `arity == 0, size == 2` (two empty tuples) differs from `size == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntTuples {
    pub size: usize,
    pub arity: i32,
    pub data: Vec<i32>,
}

impl Default for IntTuples {
    fn default() -> Self {
        Self::empty(FLAT)
    }
}

impl IntTuples {
    /// Zero-filled container of `size` entries
    pub fn alloc(size: usize, arity: i32) -> CjResult<Self> {
        if arity < FLAT {
            return Err(CjError::arg(format!("Invalid arity {}", arity)));
        }
        let scalars = size
            .checked_mul(Self::stride(arity))
            .ok_or_else(|| CjError::arg(format!("{} tuples of arity {} overflow", size, arity)))?;

        Ok(Self {
            size,
            arity,
            data: vec![0; scalars],
        })
    }

    /// No entries, with the given arity
    pub fn empty(arity: i32) -> Self {
        Self {
            size: 0,
            arity,
            data: Vec::new(),
        }
    }

    /// Flat list holding `values`
    pub fn flat(values: Vec<i32>) -> Self {
        Self {
            size: values.len(),
            arity: FLAT,
            data: values,
        }
    }

    /// Tuples of width `width`; every row must have exactly that width
    pub fn from_rows<R: AsRef<[i32]>>(width: usize, rows: &[R]) -> CjResult<Self> {
        let arity = i32::try_from(width)
            .map_err(|_| CjError::arg(format!("Tuple width {} too large", width)))?;

        let mut data = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(CjError::arg(format!(
                    "Row {} has width {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            size: rows.len(),
            arity,
            data,
        })
    }

    fn stride(arity: i32) -> usize {
        if arity == FLAT {
            1
        } else {
            usize::try_from(arity).unwrap_or(0)
        }
    }

    /// Number of entries (integers when flat, tuples otherwise)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_flat(&self) -> bool {
        self.arity == FLAT
    }

    /// Tuple width, 0 for flat lists
    pub fn width(&self) -> usize {
        usize::try_from(self.arity).unwrap_or(0)
    }

    /// Returns true if `data` holds exactly the scalars `size` and `arity` call for
    pub fn is_consistent(&self) -> bool {
        self.arity >= FLAT
            && self
                .size
                .checked_mul(Self::stride(self.arity))
                .map_or(false, |n| n == self.data.len())
    }

    /// The `i`-th integer of a flat list
    pub fn get(&self, i: usize) -> Option<i32> {
        if !self.is_flat() || i >= self.size {
            return None;
        }
        self.data.get(i).copied()
    }

    /// The `i`-th tuple
    pub fn tuple(&self, i: usize) -> Option<&[i32]> {
        if self.is_flat() || i >= self.size {
            return None;
        }
        let w = self.width();
        self.data.get(i * w..(i + 1) * w)
    }

    /// All tuples in order; empty for flat lists
    pub fn tuples(&self) -> impl Iterator<Item = &[i32]> + '_ {
        let count = if self.is_flat() { 0 } else { self.size };
        (0..count).map(move |i| self.tuple(i).unwrap_or_default())
    }
}

impl From<Vec<i32>> for IntTuples {
    fn from(values: Vec<i32>) -> Self {
        Self::flat(values)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, values: &[i32]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", v)?;
    }
    Ok(())
}

/// Canonical text: `[]`, `[1, 2]` or `[[1, 2], [3, 4]]`
impl fmt::Display for IntTuples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        if self.is_flat() {
            let n = self.size.min(self.data.len());
            write_joined(f, &self.data[..n])?;
        } else {
            for (i, tuple) in self.tuples().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str("[")?;
                write_joined(f, tuple)?;
                f.write_str("]")?;
            }
        }
        f.write_str("]")
    }
}
