use std::io::{self, Write};

use crate::types::AssessmentResponse;

const SEPARATOR: &str = "--------------------------------------------------";

/// Render a finished assessment as line-oriented text.
///
/// Endpoints are printed in the order the service returned them.
pub fn write_report<W: Write>(out: &mut W, result: &AssessmentResponse) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "TLS Analysis completed for: {}", result.host)?;
    writeln!(out, "{SEPARATOR}")?;

    if result.endpoints.is_empty() {
        writeln!(out, "No endpoints found.")?;
        return Ok(());
    }

    for ep in &result.endpoints {
        writeln!(out, "IP Address: {}", ep.ip_address)?;
        writeln!(out, "Status: {}", ep.status_message)?;
        if ep.grade.is_empty() {
            writeln!(out, "Grade: Not available")?;
        } else {
            writeln!(out, "Grade: {}", ep.grade)?;
        }
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}
