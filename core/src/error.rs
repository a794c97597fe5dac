use thiserror::Error;

use crate::SymbolIndex;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Card already flipped")]
    AlreadyRevealed,
    #[error("Can't pick the same card twice")]
    SamePick,
    #[error("Game already ended, no new picks are accepted")]
    AlreadyEnded,
    #[error("Unknown theme id {0}")]
    UnknownTheme(u8),
    #[error("Symbol index out of theme range")]
    UnknownSymbol,
    #[error("Board needs a non-zero, even number of rows and columns")]
    OddCellCount,
    #[error("Symbol {0} does not appear an even number of times")]
    UnpairedSymbol(SymbolIndex),
    #[error("Revealed cards of symbol {0} do not form whole pairs")]
    UnpairedReveal(SymbolIndex),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure to restore or store the save slot.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("save slot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed save record at line {line}: {reason}")]
    Malformed { line: usize, reason: &'static str },
    #[error("save record describes an invalid game: {0}")]
    Game(#[from] GameError),
}
