use anyhow::{Result, bail};
use memento_core::{
    BoardGenerator, Coord2, Difficulty, GameError, MATCH_REWARD, MISMATCH_PENALTY, PickOutcome,
    PlayEngine, RandomBoardGenerator, RevealPacer, SaveSlot, Theme, coords_from_signed,
};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::prompt::{FirstPick, TokenReader};
use crate::render::write_board;

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Shuffle seed, drawn once per process
    pub seed: u64,
    pub slot: SaveSlot,
    /// How long a mismatched pair stays face up
    pub mismatch_delay: Duration,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SessionEnd {
    Won,
    Saved,
}

/// Renders the pair under consideration and holds a mismatch on screen for a while.
struct ConsolePacer<'a, W> {
    out: &'a mut W,
    delay: Duration,
    error: Option<io::Error>,
}

impl<'a, W: Write> ConsolePacer<'a, W> {
    fn new(out: &'a mut W, delay: Duration) -> Self {
        Self {
            out,
            delay,
            error: None,
        }
    }

    fn announce(&mut self, engine: &PlayEngine, matched: bool) -> io::Result<()> {
        write_board(&mut *self.out, engine)?;
        if matched {
            writeln!(self.out, "Match found! +{} points", MATCH_REWARD)?;
        } else {
            writeln!(self.out, "No match! -{} points", MISMATCH_PENALTY)?;
        }
        self.out.flush()
    }

    fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

impl<W: Write> RevealPacer for ConsolePacer<'_, W> {
    fn hold(&mut self, engine: &PlayEngine, _pair: (Coord2, Coord2), matched: bool) {
        if let Err(err) = self.announce(engine, matched) {
            self.error.get_or_insert(err);
        }
        if !matched && !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

/// Message shown when a pick is refused.
fn rejection(err: GameError) -> String {
    match err {
        GameError::InvalidCoords => "Invalid coordinates!".to_string(),
        GameError::AlreadyRevealed => "Card already flipped!".to_string(),
        GameError::SamePick => "Can't pick same card!".to_string(),
        other => format!("{}!", other),
    }
}

/// One run of the game over a console-like input/output pair.
pub struct Session<R, W> {
    input: TokenReader<R>,
    out: W,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, options: SessionOptions) -> Self {
        Self {
            input: TokenReader::new(input),
            out,
            options,
        }
    }

    pub fn run(&mut self) -> Result<SessionEnd> {
        writeln!(self.out, "Memory Match Game")?;
        writeln!(self.out, "1. New Game\n2. Load Game")?;
        self.out.flush()?;

        let loaded = match self.input.next_int()? {
            Some(2) => self.load(),
            _ => None,
        };
        let mut engine = match loaded {
            Some(engine) => {
                writeln!(self.out, "Game loaded successfully!")?;
                engine
            }
            None => self.new_game()?,
        };

        writeln!(self.out, "Score: {}", engine.score())?;
        writeln!(self.out, "Find all pairs!\n")?;
        self.play(&mut engine)
    }

    fn load(&mut self) -> Option<PlayEngine> {
        match self.options.slot.load() {
            Ok(engine) => engine,
            Err(err) => {
                log::warn!(
                    "Ignoring unusable save at {}: {}",
                    self.options.slot.path().display(),
                    err
                );
                None
            }
        }
    }

    fn new_game(&mut self) -> Result<PlayEngine> {
        writeln!(
            self.out,
            "Select difficulty:\n1. Easy (2x2)\n2. Medium (4x4)\n3. Hard (6x6)"
        )?;
        self.out.flush()?;
        let Some(difficulty) = self.input.next_int()?.and_then(Difficulty::from_choice) else {
            writeln!(self.out, "Invalid choice!")?;
            bail!("invalid difficulty choice");
        };

        writeln!(self.out, "Select theme:")?;
        for theme in Theme::ALL {
            writeln!(self.out, "{}. {}", theme.id(), theme.label())?;
        }
        self.out.flush()?;
        let choice = self.input.next_int()?;
        let theme = match choice
            .and_then(|id| u8::try_from(id).ok())
            .map(Theme::from_id)
        {
            Some(Ok(theme)) => theme,
            _ => {
                writeln!(self.out, "Invalid choice!")?;
                bail!("invalid theme choice {:?}", choice);
            }
        };

        let board = RandomBoardGenerator::new(self.options.seed).generate(difficulty.config(theme))?;
        Ok(PlayEngine::new(board))
    }

    fn play(&mut self, engine: &mut PlayEngine) -> Result<SessionEnd> {
        loop {
            if engine.is_won() {
                return self.celebrate(engine);
            }
            write_board(&mut self.out, engine)?;

            loop {
                write!(self.out, "Enter first card (row col) or 'save': ")?;
                self.out.flush()?;
                match self.input.read_first_pick()? {
                    FirstPick::Save => {
                        self.options.slot.store(engine)?;
                        writeln!(self.out, "Game saved. Exiting.")?;
                        return Ok(SessionEnd::Saved);
                    }
                    FirstPick::Invalid => writeln!(self.out, "Invalid input!")?,
                    FirstPick::Cell(row, col) => match self.pick(engine, (row, col))? {
                        Ok(_) => break,
                        Err(err) => writeln!(self.out, "{}", rejection(err))?,
                    },
                }
            }

            let outcome = loop {
                write!(self.out, "Enter second card (row col): ")?;
                self.out.flush()?;
                match self.input.read_cell()? {
                    None => writeln!(self.out, "Invalid input!")?,
                    Some(cell) => match self.pick(engine, cell)? {
                        Ok(outcome) => break outcome,
                        Err(err) => writeln!(self.out, "{}", rejection(err))?,
                    },
                }
            };

            if outcome == PickOutcome::Won {
                return self.celebrate(engine);
            }
        }
    }

    /// Applies a pick; the outer result carries I/O failures, the inner one rejected picks.
    fn pick(
        &mut self,
        engine: &mut PlayEngine,
        (row, col): (i64, i64),
    ) -> Result<core::result::Result<PickOutcome, GameError>> {
        let Some(coords) = coords_from_signed(row, col) else {
            return Ok(Err(GameError::InvalidCoords));
        };

        let mut pacer = ConsolePacer::new(&mut self.out, self.options.mismatch_delay);
        let outcome = engine.pick(coords, &mut pacer);
        pacer.finish()?;
        Ok(outcome)
    }

    fn celebrate(&mut self, engine: &PlayEngine) -> Result<SessionEnd> {
        write_board(&mut self.out, engine)?;
        writeln!(
            self.out,
            "Congratulations! You won in {} turns!",
            engine.turns()
        )?;
        writeln!(self.out, "Final score: {}", engine.score())?;
        self.out.flush()?;
        Ok(SessionEnd::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memento_core::{Board, encode};

    fn options(name: &str) -> SessionOptions {
        let path = std::env::temp_dir().join(format!(
            "memento-cli-{}-{}.dat",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        SessionOptions {
            seed: 5,
            slot: SaveSlot::new(path),
            mismatch_delay: Duration::ZERO,
        }
    }

    fn run(input: &str, options: SessionOptions) -> (Result<SessionEnd>, String) {
        let mut out = Vec::new();
        let end = Session::new(input.as_bytes(), &mut out, options).run();
        (end, String::from_utf8(out).unwrap())
    }

    /// Picks that clear `board` perfectly, pair by pair.
    fn perfect_picks(board: &Board) -> String {
        let (rows, cols) = board.size();
        let mut cells: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .collect();
        let mut script = String::new();
        while let Some(first) = cells.pop() {
            let at = cells
                .iter()
                .position(|&other| board[other] == board[first])
                .unwrap();
            let second = cells.remove(at);
            script.push_str(&format!("{} {}\n{} {}\n", first.0, first.1, second.0, second.1));
        }
        script
    }

    fn store_sorted_game(options: &SessionOptions) {
        let board = Board::from_row_major(Theme::Letters, (2, 2), vec![0, 0, 1, 1]).unwrap();
        std::fs::write(options.slot.path(), encode(&PlayEngine::new(board))).unwrap();
    }

    #[test]
    fn loaded_game_wins_after_two_matches() {
        let options = options("load-win");
        store_sorted_game(&options);
        let path = options.slot.path().to_owned();

        let (end, out) = run("2\n0 0\n0 1\n1 0 1 1\n", options);

        assert_eq!(end.unwrap(), SessionEnd::Won);
        assert!(out.contains("Game loaded successfully!"));
        assert!(out.contains("Match found! +10 points"));
        assert!(out.contains("0 [A][A]\n1 [B][B]\nScore: 20  Turns: 2"));
        assert!(out.contains("Congratulations! You won in 2 turns!\nFinal score: 20\n"));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn new_game_played_to_the_end() {
        let options = options("new-win");
        let board = RandomBoardGenerator::new(options.seed)
            .generate(Difficulty::Medium.config(Theme::Pictograms))
            .unwrap();
        let input = format!("1\n2\n3\n{}", perfect_picks(&board));

        let (end, out) = run(&input, options);

        assert_eq!(end.unwrap(), SessionEnd::Won);
        assert!(out.contains("Select difficulty:"));
        assert!(out.contains("3. Pictograms"));
        assert!(out.contains("You won in 8 turns!\nFinal score: 80\n"));
    }

    #[test]
    fn bad_picks_are_reprompted() {
        let options = options("reprompt");
        store_sorted_game(&options);
        let path = options.slot.path().to_owned();

        let input = "2\n2 0\n-1 0\nhello\n0 0\n0 0\n0 5\n1 0\n0 0\n0 1\n1 1\n1 0\n";
        let (end, out) = run(input, options);

        assert_eq!(end.unwrap(), SessionEnd::Won);
        assert_eq!(out.matches("Invalid coordinates!").count(), 3);
        assert_eq!(out.matches("Invalid input!").count(), 1);
        assert_eq!(out.matches("Can't pick same card!").count(), 1);
        assert!(out.contains("No match! -5 points"));
        assert!(out.contains("Final score: 15"));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn flipped_cards_are_refused() {
        let options = options("flipped");
        store_sorted_game(&options);
        let path = options.slot.path().to_owned();

        let (end, out) = run("2\n0 0 0 1\n0 1\n1 0\n0 0\n1 1\n", options);

        assert_eq!(end.unwrap(), SessionEnd::Won);
        assert_eq!(out.matches("Card already flipped!").count(), 2);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn save_writes_slot_and_exits() {
        let options = options("save");
        let slot = options.slot.clone();

        let (end, out) = run("1\n1\n2\nsave\n", options);

        assert_eq!(end.unwrap(), SessionEnd::Saved);
        assert!(out.ends_with("Game saved. Exiting.\n"));
        let saved = slot.load().unwrap().unwrap();
        assert_eq!(saved.size(), (2, 2));
        assert_eq!(saved.theme(), Theme::Digits);
        assert_eq!(saved.turns(), 0);
        std::fs::remove_file(slot.path()).unwrap();
    }

    #[test]
    fn save_and_load_resume_the_same_game() {
        let options = options("resume");
        let slot = options.slot.clone();
        let board = RandomBoardGenerator::new(options.seed)
            .generate(Difficulty::Easy.config(Theme::Letters))
            .unwrap();
        let picks = perfect_picks(&board);
        let (first_turn, second_turn) = picks.split_at(picks.match_indices('\n').nth(1).unwrap().0 + 1);

        let (end, _) = run(&format!("1\n1\n1\n{}save\n", first_turn), options.clone());
        assert_eq!(end.unwrap(), SessionEnd::Saved);

        let (end, out) = run(&format!("2\n{}", second_turn), options);
        assert_eq!(end.unwrap(), SessionEnd::Won);
        assert!(out.contains("Score: 10\n"));
        assert!(out.contains("You won in 2 turns!\nFinal score: 20\n"));
        std::fs::remove_file(slot.path()).unwrap();
    }

    #[test]
    fn missing_or_corrupt_save_falls_through_to_new_game() {
        let options = options("corrupt");
        let (end, out) = run("2\n1\n1\nsave\n", options.clone());
        assert_eq!(end.unwrap(), SessionEnd::Saved);
        assert!(!out.contains("Game loaded successfully!"));
        assert!(out.contains("Select difficulty:"));

        std::fs::write(options.slot.path(), "2 2 0 0 9\n").unwrap();
        let (end, out) = run("2\n1\n1\nsave\n", options.clone());
        assert_eq!(end.unwrap(), SessionEnd::Saved);
        assert!(out.contains("Select theme:"));

        // a revealed card whose partner is still face down could never be finished
        std::fs::write(options.slot.path(), "2 2 0 0 1\n0 0\n1 1\n1 0\n0 0\n").unwrap();
        let (end, out) = run("2\n1\n1\nsave\n", options.clone());
        assert_eq!(end.unwrap(), SessionEnd::Saved);
        assert!(!out.contains("Game loaded successfully!"));
        assert!(out.contains("Select difficulty:"));
        std::fs::remove_file(options.slot.path()).unwrap();
    }

    #[test]
    fn invalid_difficulty_is_fatal() {
        let (end, out) = run("1\n4\n", options("bad-difficulty"));

        assert!(end.is_err());
        assert!(out.ends_with("Invalid choice!\n"));
    }

    #[test]
    fn invalid_theme_is_fatal() {
        let (end, out) = run("1\n1\n7\n", options("bad-theme"));

        assert!(end.is_err());
        assert!(out.ends_with("Invalid choice!\n"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let (end, _) = run("1\n1\n1\n0 0\n", options("eof"));
        assert!(end.is_err());
    }
}
