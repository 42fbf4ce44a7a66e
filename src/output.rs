use std::io::Write;

use crate::error::AppResult;
use crate::http::FetchOutcome;

/// Writes a completed response, curl-style: optional status line and
/// headers first, then the raw body. The whole rendering goes to one
/// sink, so `-i` headers land in the `-o` file when one is given.
///
/// # Errors
///
/// Returns an error when the output file or stdout cannot be written.
pub fn write_response(
    outcome: &FetchOutcome,
    include_headers: bool,
    output: Option<&str>,
) -> AppResult<()> {
    let rendered = render_response(outcome, include_headers)?;

    if let Some(path) = output {
        std::fs::write(path, rendered)?;
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&rendered)?;
    stdout.flush()?;

    Ok(())
}

fn render_response(outcome: &FetchOutcome, include_headers: bool) -> AppResult<Vec<u8>> {
    let mut rendered = Vec::with_capacity(outcome.body.len());

    if include_headers {
        writeln!(rendered, "{:?} {}", outcome.version, outcome.status)?;
        for (name, value) in &outcome.headers {
            writeln!(
                rendered,
                "{}: {}",
                name,
                String::from_utf8_lossy(value.as_bytes())
            )?;
        }
        writeln!(rendered)?;
    }

    rendered.extend_from_slice(&outcome.body);
    Ok(rendered)
}
