//! Validate the post collection

use anyhow::Result;

use crate::content::validate::{has_errors, Severity};
use crate::Blog;

/// Run validation and print every diagnostic.
///
/// Returns whether any error-severity diagnostic was found, so the caller
/// can pick the exit status.
pub fn run(blog: &Blog) -> Result<bool> {
    let diagnostics = blog.check()?;

    if diagnostics.is_empty() {
        println!("All posts OK");
        return Ok(false);
    }

    for diagnostic in &diagnostics {
        println!("{}", diagnostic);
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;
    println!("{} error(s), {} warning(s)", errors, warnings);

    Ok(has_errors(&diagnostics))
}
