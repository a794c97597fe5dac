use memento_core::PlayEngine;
use std::io::{self, Write};

/// Draws the grid with row/column headers, then the score line.
pub fn write_board(out: &mut impl Write, engine: &PlayEngine) -> io::Result<()> {
    let (rows, cols) = engine.size();

    write!(out, "\n  ")?;
    for col in 0..cols {
        write!(out, " {} ", col)?;
    }
    writeln!(out)?;

    for row in 0..rows {
        write!(out, "{} ", row)?;
        for col in 0..cols {
            match engine.visible_face((row, col)) {
                Some(face) => write!(out, "[{}]", face)?,
                None => write!(out, "[ ]")?,
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "Score: {}  Turns: {}\n", engine.score(), engine.turns())
}
