use serde::{Deserialize, Serialize};

use crate::*;

/// Every theme carries exactly this many distinct symbols.
pub const SYMBOLS_PER_THEME: usize = 8;

const LETTERS: [&str; SYMBOLS_PER_THEME] = ["A", "B", "C", "D", "E", "F", "G", "H"];
const DIGITS: [&str; SYMBOLS_PER_THEME] = ["1", "2", "3", "4", "5", "6", "7", "8"];
const PICTOGRAMS: [&str; SYMBOLS_PER_THEME] = ["🐶", "🐱", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮"];

/// Symbol alphabet used to populate the pairs of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Letters,
    Digits,
    Pictograms,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Letters, Theme::Digits, Theme::Pictograms];

    /// Resolves the menu/save id (1, 2 or 3).
    pub const fn from_id(id: u8) -> Result<Self> {
        use Theme::*;
        match id {
            1 => Ok(Letters),
            2 => Ok(Digits),
            3 => Ok(Pictograms),
            _ => Err(GameError::UnknownTheme(id)),
        }
    }

    pub const fn id(self) -> u8 {
        use Theme::*;
        match self {
            Letters => 1,
            Digits => 2,
            Pictograms => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        use Theme::*;
        match self {
            Letters => "Letters",
            Digits => "Digits",
            Pictograms => "Pictograms",
        }
    }

    pub const fn symbols(self) -> &'static [&'static str; SYMBOLS_PER_THEME] {
        use Theme::*;
        match self {
            Letters => &LETTERS,
            Digits => &DIGITS,
            Pictograms => &PICTOGRAMS,
        }
    }

    pub fn symbol(self, index: SymbolIndex) -> Option<&'static str> {
        self.symbols().get(usize::from(index)).copied()
    }

    pub fn index_of(self, symbol: &str) -> Option<SymbolIndex> {
        self.symbols()
            .iter()
            .position(|&candidate| candidate == symbol)
            .and_then(|index| index.try_into().ok())
    }
}
