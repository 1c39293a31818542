pub mod csv;
pub mod json;
pub mod table;

/// Print parser diagnostics: terse by default, under a header in verbose mode.
pub fn print_diagnostics(diagnostics: &[String], verbose: bool) {
    if diagnostics.is_empty() {
        return;
    }

    println!();
    if verbose {
        println!("Diagnostics:");
        println!("{}", "-".repeat(40));
        for diagnostic in diagnostics {
            println!("  {diagnostic}");
        }
    } else {
        for diagnostic in diagnostics {
            println!("[diagnostic] {diagnostic}");
        }
    }
}

/// RFC 3339 storage form to the display form used in tables.
pub(crate) fn format_instant(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
