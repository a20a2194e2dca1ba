//! Canonical printer
//!
//! One fixed layout: two-space indentation, fields in declaration order,
//! one array element per line. Printing canonical text that was just
//! decoded reproduces it byte for byte. The instance is not validated.

use std::fmt::{self, Write as _};
use std::io;

use super::types::Csp;

/// Canonical text of `csp`
pub fn print(csp: &Csp) -> String {
    csp.to_string()
}

/// Stream the canonical text of `csp` into `writer`
pub fn print_to<W: io::Write>(writer: &mut W, csp: &Csp) -> io::Result<()> {
    write!(writer, "{}", csp)?;
    writer.flush()
}

/// Multi-line array block: `[]` when empty, otherwise one item per line
fn write_block<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    items: &[T],
    last: bool,
) -> fmt::Result {
    let sep = if last { "" } else { "," };
    if items.is_empty() {
        return writeln!(f, "  \"{}\": []{}", name, sep);
    }

    writeln!(f, "  \"{}\": [", name)?;
    for (i, item) in items.iter().enumerate() {
        f.write_str("    ")?;
        write!(f, "{}", item)?;
        f.write_str(if i + 1 < items.len() { ",\n" } else { "\n" })?;
    }
    writeln!(f, "  ]{}", sep)
}

impl fmt::Display for Csp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\n")?;

        f.write_str("  \"meta\": {\n")?;
        writeln!(f, "    \"id\": \"{}\",", self.meta.id)?;
        writeln!(f, "    \"algo\": \"{}\",", self.meta.algo)?;
        writeln!(f, "    \"params\": {}", self.meta.params_json)?;
        f.write_str("  },\n")?;

        write_block(f, "domains", &self.domains, false)?;
        writeln!(f, "  \"vars\": {},", self.vars)?;
        write_block(f, "constraintDefs", &self.constraint_defs, false)?;
        write_block(f, "constraints", &self.constraints, true)?;

        f.write_char('}')?;
        f.write_char('\n')
    }
}
