//! The textual diagnostic report printed after an analysis run. Human
//! diagnostics only — not part of the machine interface.

use std::io::{self, Write};

use crate::analysis::IndexAnalysis;

/// Writes the full report to `sink`.
pub fn print(analysis: &IndexAnalysis, sink: &mut dyn Write) -> io::Result<()> {
    writeln!(sink, "------ Auto-Index-Generation Report -------")?;
    for (relation, set) in analysis.relations() {
        writeln!(sink, "Relation {}", relation.name)?;
        writeln!(sink, "\tNumber of Search Patterns: {}", set.searches().count())?;
        for pattern in set.searches() {
            write!(sink, "\t\t")?;
            for col in pattern.columns() {
                write!(sink, "{} ", relation.arg_name(col))?;
            }
            writeln!(sink)?;
        }

        writeln!(sink, "\tNumber of Indexes: {}", set.orders().len())?;
        for order in set.orders() {
            write!(sink, "\t\t")?;
            for &col in order {
                write!(sink, "{} ", relation.arg_name(col))?;
            }
            writeln!(sink)?;
        }
    }
    writeln!(sink, "------ End of Auto-Index-Generation Report -------")?;
    Ok(())
}
