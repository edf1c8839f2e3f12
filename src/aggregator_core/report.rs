//! Sorted report rendering

use super::router::ResultMapping;
use std::io::{self, Write};

/// Write one `<date>  : <mean>` line per date, sorted ascending.
///
/// Lexicographic order of the canonical `"YYYY-MM-DD"` keys is chronological
/// order, so a plain string sort is enough.
pub fn render_report<W: Write>(result: &ResultMapping, out: &mut W) -> io::Result<()> {
    let mut dates: Vec<&String> = result.keys().collect();
    dates.sort();
    for date in dates {
        writeln!(out, "{}  : {}", date, result[date])?;
    }
    Ok(())
}
