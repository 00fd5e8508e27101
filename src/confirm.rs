//! Confirmation gate.
//! Renders the pending plan and blocks for a single yes/no line on stdin.
//! This is the only suspension point in the pipeline; there is no retry and
//! no timeout. Anything but an explicit "y" (case-insensitive) declines.

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use std::io::{self, BufRead, Write};

use crate::plan::PlannedRename;

/// Render the pending plan as a source → destination table.
pub fn preview_table(entries: &[PlannedRename]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Source"), Cell::new("Destination")]);
    for entry in entries {
        table.add_row(vec![
            entry.source.display().to_string(),
            entry.dest.display().to_string(),
        ]);
    }
    table
}

/// Read one line and decide. EOF counts as a decline, as does any answer
/// other than a trimmed, case-insensitive "y".
pub fn read_decision<R: BufRead, W: Write>(
    input: &mut R,
    prompt_out: &mut W,
    pending: usize,
) -> io::Result<bool> {
    write!(prompt_out, "Rename {pending} file(s)? [y/N] ")?;
    prompt_out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Ok(false);
    }
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

/// Prompt on the real stdin/stdout.
pub fn ask(pending: usize) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut locked = stdin.lock();
    read_decision(&mut locked, &mut io::stdout(), pending)
}
