use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use save::*;
pub use theme::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod save;
mod theme;
mod types;

/// Preset square board sizes offered by the difficulty menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Maps the menu choice 1/2/3, anything else is not a difficulty.
    pub const fn from_choice(choice: i64) -> Option<Self> {
        use Difficulty::*;
        match choice {
            1 => Some(Easy),
            2 => Some(Medium),
            3 => Some(Hard),
            _ => None,
        }
    }

    pub const fn side(self) -> Coord {
        use Difficulty::*;
        match self {
            Easy => 2,
            Medium => 4,
            Hard => 6,
        }
    }

    pub const fn config(self, theme: Theme) -> GameConfig {
        GameConfig::new_unchecked((self.side(), self.side()), theme)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub theme: Theme,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, theme: Theme) -> Self {
        Self { size, theme }
    }

    pub fn new(size: Coord2, theme: Theme) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 || rows % 2 != 0 || cols % 2 != 0 {
            return Err(GameError::OddCellCount);
        }
        Ok(Self::new_unchecked(size, theme))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }
}

/// Symbol assignment of every cell, stored as theme-relative indices in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    theme: Theme,
    symbols: Array2<SymbolIndex>,
}

impl Board {
    pub fn from_symbols(theme: Theme, symbols: Array2<SymbolIndex>) -> Result<Self> {
        let (rows, cols) = symbols.dim();
        let rows: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        let cols: Coord = cols.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        GameConfig::new((rows, cols), theme)?;

        if symbols
            .iter()
            .any(|&index| usize::from(index) >= SYMBOLS_PER_THEME)
        {
            return Err(GameError::UnknownSymbol);
        }
        check_pairs(symbols.iter().copied()).map_err(GameError::UnpairedSymbol)?;

        Ok(Self { theme, symbols })
    }

    /// Lays `symbols` into a `size` grid row by row.
    pub fn from_row_major(theme: Theme, size: Coord2, symbols: Vec<SymbolIndex>) -> Result<Self> {
        let grid = Array2::from_shape_vec((usize::from(size.0), usize::from(size.1)), symbols)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_symbols(theme, grid)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.theme)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.symbols.dim();
        // from_symbols guarantees both axes fit
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.game_config().total_cells()
    }

    pub fn pair_count(&self) -> CellCount {
        self.game_config().pair_count()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Display string of the card at `coords`.
    pub fn face_at(&self, coords: Coord2) -> &'static str {
        // indices were range checked on construction
        self.theme.symbols()[usize::from(self[coords])]
    }

    pub fn symbols(&self) -> &Array2<SymbolIndex> {
        &self.symbols
    }

    pub fn iter_row_major(&self) -> impl Iterator<Item = SymbolIndex> + '_ {
        self.symbols.iter().copied()
    }
}

/// Fails with the first symbol that occurs an odd number of times in `symbols`.
pub(crate) fn check_pairs(
    symbols: impl Iterator<Item = SymbolIndex>,
) -> core::result::Result<(), SymbolIndex> {
    let mut counts = [0usize; SYMBOLS_PER_THEME];
    for symbol in symbols {
        counts[usize::from(symbol)] += 1;
    }
    match counts.iter().position(|count| count % 2 != 0) {
        Some(symbol) => Err(symbol as SymbolIndex),
        None => Ok(()),
    }
}

impl Index<Coord2> for Board {
    type Output = SymbolIndex;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.symbols[coords.to_nd_index()]
    }
}

/// Outcome of a single accepted pick
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PickOutcome {
    /// First card of the turn chosen, still face down
    FirstPicked,
    /// Both cards share a symbol and stay face up
    Matched,
    /// Cards differ and were turned back over
    Mismatched,
    /// The pick completed the last pair
    Won,
}
