use core::str::FromStr;
use ndarray::Array2;
use std::path::{Path, PathBuf};

use crate::*;

/// Name of the single save slot, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "save.dat";

/// Serializes `engine` into the save record text.
///
/// Line 1 is `rows cols score turns theme`, followed by `rows` lines of symbol indices and
/// `rows` lines of 0/1 reveal flags. A pending first pick is not part of the record.
pub fn encode(engine: &PlayEngine) -> String {
    let (rows, cols) = engine.size();
    let mut out = format!(
        "{} {} {} {} {}\n",
        rows,
        cols,
        engine.score(),
        engine.turns(),
        engine.theme().id()
    );
    for row in engine.board().symbols().rows() {
        push_row(&mut out, row.iter().map(|index| index.to_string()));
    }
    for row in engine.revealed_mask().rows() {
        push_row(&mut out, row.iter().map(|&up| u8::from(up).to_string()));
    }
    out
}

fn push_row(out: &mut String, values: impl Iterator<Item = String>) {
    let line: Vec<String> = values.collect();
    out.push_str(&line.join(" "));
    out.push('\n');
}

/// Rebuilds a game from a save record, rejecting anything that does not describe a valid game.
pub fn decode(text: &str) -> core::result::Result<PlayEngine, SaveError> {
    let mut reader = RecordReader::new(text);

    let header: [i64; 5] = reader
        .fields::<i64>(5)?
        .try_into()
        .map_err(|_| reader.malformed("header needs 5 fields"))?;
    let [rows, cols, score, turns, theme] = header;

    let rows: Coord = rows
        .try_into()
        .map_err(|_| reader.malformed("row count out of range"))?;
    let cols: Coord = cols
        .try_into()
        .map_err(|_| reader.malformed("column count out of range"))?;
    let score: i32 = score
        .try_into()
        .map_err(|_| reader.malformed("score out of range"))?;
    let turns: u32 = turns
        .try_into()
        .map_err(|_| reader.malformed("turn count out of range"))?;
    let theme: u8 = theme
        .try_into()
        .map_err(|_| reader.malformed("theme id out of range"))?;

    let config = GameConfig::new((rows, cols), Theme::from_id(theme)?)?;
    let cols_len = usize::from(cols);

    let mut symbols = Vec::with_capacity(usize::from(config.total_cells()));
    for _ in 0..rows {
        symbols.extend(reader.fields::<SymbolIndex>(cols_len)?);
    }
    let board = Board::from_row_major(config.theme, config.size, symbols)?;

    let mut flags = Vec::with_capacity(usize::from(config.total_cells()));
    for _ in 0..rows {
        for flag in reader.fields::<u8>(cols_len)? {
            flags.push(match flag {
                0 => false,
                1 => true,
                _ => return Err(reader.malformed("reveal flag must be 0 or 1")),
            });
        }
    }
    let revealed = Array2::from_shape_vec((usize::from(rows), cols_len), flags)
        .map_err(|_| GameError::InvalidBoardShape)?;

    reader.finish()?;
    Ok(PlayEngine::from_parts(board, revealed, score, turns)?)
}

/// Walks a record line by line, remembering the current line for error reports.
struct RecordReader<'a> {
    lines: core::str::Lines<'a>,
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn malformed(&self, reason: &'static str) -> SaveError {
        SaveError::Malformed {
            line: self.line,
            reason,
        }
    }

    /// Reads the next line as exactly `count` whitespace separated values.
    fn fields<T: FromStr>(&mut self, count: usize) -> core::result::Result<Vec<T>, SaveError> {
        self.line += 1;
        let Some(line) = self.lines.next() else {
            return Err(self.malformed("record ends early"));
        };

        let values = line
            .split_whitespace()
            .map(|token| token.parse::<T>())
            .collect::<core::result::Result<Vec<_>, _>>()
            .map_err(|_| self.malformed("expected integer"))?;

        if values.len() != count {
            return Err(self.malformed("wrong number of fields"));
        }
        Ok(values)
    }

    /// Only blank lines may follow the record.
    fn finish(&mut self) -> core::result::Result<(), SaveError> {
        for line in self.lines.by_ref() {
            self.line += 1;
            if !line.trim().is_empty() {
                return Err(SaveError::Malformed {
                    line: self.line,
                    reason: "trailing data after record",
                });
            }
        }
        Ok(())
    }
}

/// The one persisted game, overwritten by every save.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, engine: &PlayEngine) -> core::result::Result<(), SaveError> {
        std::fs::write(&self.path, encode(engine))?;
        log::info!("Saved game to {}", self.path.display());
        Ok(())
    }

    /// Loads the saved game, `None` when nothing has been saved yet.
    pub fn load(&self) -> core::result::Result<Option<PlayEngine>, SaveError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No save at {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let engine = decode(&text)?;
        log::info!("Loaded game from {}", self.path.display());
        Ok(Some(engine))
    }
}
