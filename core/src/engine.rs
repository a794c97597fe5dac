use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Points awarded when both cards of a turn match.
pub const MATCH_REWARD: i32 = 10;

/// Points deducted when the cards of a turn differ.
pub const MISMATCH_PENALTY: i32 = 5;

/// Valid transitions:
/// - AwaitFirst -> AwaitSecond
/// - AwaitSecond -> AwaitFirst
/// - AwaitSecond -> Won
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    AwaitFirst,
    AwaitSecond(Coord2),
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::AwaitFirst
    }
}

/// Hook run while both cards of a completed turn are face up.
pub trait RevealPacer {
    /// Called before a mismatched pair is turned back over, `matched` tells which way the turn went.
    fn hold(&mut self, engine: &PlayEngine, pair: (Coord2, Coord2), matched: bool);
}

impl RevealPacer for () {
    fn hold(&mut self, _engine: &PlayEngine, _pair: (Coord2, Coord2), _matched: bool) {}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    score: i32,
    turns: u32,
    state: EngineState,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        let size = board.size();
        Self {
            board,
            revealed: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            score: 0,
            turns: 0,
            state: Default::default(),
        }
    }

    /// Rebuilds an engine from persisted parts, a fully revealed board is already won.
    pub fn from_parts(board: Board, revealed: Array2<bool>, score: i32, turns: u32) -> Result<Self> {
        let (rows, cols) = board.size();
        if revealed.dim() != (usize::from(rows), usize::from(cols)) {
            return Err(GameError::InvalidBoardShape);
        }

        check_pairs(
            board
                .iter_row_major()
                .zip(revealed.iter())
                .filter(|&(_, &up)| up)
                .map(|(symbol, _)| symbol),
        )
        .map_err(GameError::UnpairedReveal)?;

        let revealed_count = revealed.iter().filter(|&&up| up).count() as CellCount;
        let mut engine = Self {
            board,
            revealed,
            revealed_count,
            score,
            turns,
            state: EngineState::AwaitFirst,
        };
        if engine.all_revealed() {
            engine.state = EngineState::Won;
        }
        Ok(engine)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn theme(&self) -> Theme {
        self.board.theme()
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    /// Face of the card at `coords` if it is currently face up.
    pub fn visible_face(&self, coords: Coord2) -> Option<&'static str> {
        self.is_revealed(coords)
            .then(|| self.board.face_at(coords))
    }

    pub fn revealed_mask(&self) -> &Array2<bool> {
        &self.revealed
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed_count == self.board.total_cells()
    }

    /// Checks whether `coords` would be accepted as the next pick, without changing anything.
    pub fn check_pick(&self, coords: Coord2) -> Result<Coord2> {
        let coords = self.board.validate_coords(coords)?;
        match self.state {
            EngineState::Won => Err(GameError::AlreadyEnded),
            _ if self.is_revealed(coords) => Err(GameError::AlreadyRevealed),
            EngineState::AwaitSecond(first) if first == coords => Err(GameError::SamePick),
            _ => Ok(coords),
        }
    }

    /// Picks a card, resolving the turn when it is the second pick.
    pub fn pick(&mut self, coords: Coord2, pacer: &mut impl RevealPacer) -> Result<PickOutcome> {
        let coords = self.check_pick(coords)?;

        match self.state {
            EngineState::AwaitFirst => {
                log::debug!("First pick at {:?}", coords);
                self.state = EngineState::AwaitSecond(coords);
                Ok(PickOutcome::FirstPicked)
            }
            EngineState::AwaitSecond(first) => Ok(self.resolve_turn(first, coords, pacer)),
            EngineState::Won => Err(GameError::AlreadyEnded),
        }
    }

    fn resolve_turn(
        &mut self,
        first: Coord2,
        second: Coord2,
        pacer: &mut impl RevealPacer,
    ) -> PickOutcome {
        self.set_revealed(first, true);
        self.set_revealed(second, true);

        let matched = self.board[first] == self.board[second];
        pacer.hold(self, (first, second), matched);

        if matched {
            self.score += MATCH_REWARD;
        } else {
            self.score -= MISMATCH_PENALTY;
            self.set_revealed(first, false);
            self.set_revealed(second, false);
        }
        self.turns += 1;
        log::debug!(
            "Turn {} {:?} & {:?}: {}, score {}",
            self.turns,
            first,
            second,
            if matched { "match" } else { "mismatch" },
            self.score
        );

        if self.all_revealed() {
            self.state = EngineState::Won;
            log::debug!("Won after {} turns", self.turns);
            PickOutcome::Won
        } else {
            self.state = EngineState::AwaitFirst;
            if matched {
                PickOutcome::Matched
            } else {
                PickOutcome::Mismatched
            }
        }
    }

    fn set_revealed(&mut self, coords: Coord2, up: bool) {
        let cell = &mut self.revealed[coords.to_nd_index()];
        match (*cell, up) {
            (false, true) => self.revealed_count += 1,
            (true, false) => self.revealed_count -= 1,
            _ => {}
        }
        *cell = up;
    }
}
