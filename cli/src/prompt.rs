use anyhow::{Context, Result, bail};
use std::collections::VecDeque;
use std::io::BufRead;

/// Literal accepted at the first-pick prompt to save and quit.
pub const SAVE_COMMAND: &str = "save";

/// What the player typed at the first-pick prompt.
#[derive(Clone, Debug, PartialEq)]
pub enum FirstPick {
    Save,
    Cell(i64, i64),
    Invalid,
}

/// Whitespace separated tokens read across lines, so `0 1` and `0\n1` are the same answer.
pub struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    pub fn next_token(&mut self) -> Result<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read from input")?;
            if read == 0 {
                bail!("input closed before the game finished");
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    /// Next token as an integer, `None` if it is not one.
    pub fn next_int(&mut self) -> Result<Option<i64>> {
        Ok(self.next_token()?.parse().ok())
    }

    /// Forgets whatever is left of the current line.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    pub fn read_first_pick(&mut self) -> Result<FirstPick> {
        let token = self.next_token()?;
        if token == SAVE_COMMAND {
            return Ok(FirstPick::Save);
        }

        let Ok(row) = token.parse() else {
            self.discard_pending();
            return Ok(FirstPick::Invalid);
        };
        Ok(match self.next_int()? {
            Some(col) => FirstPick::Cell(row, col),
            None => {
                self.discard_pending();
                FirstPick::Invalid
            }
        })
    }

    /// Reads `row col`, `None` when either is not an integer.
    pub fn read_cell(&mut self) -> Result<Option<(i64, i64)>> {
        let Some(row) = self.next_int()? else {
            self.discard_pending();
            return Ok(None);
        };
        let Some(col) = self.next_int()? else {
            self.discard_pending();
            return Ok(None);
        };
        Ok(Some((row, col)))
    }
}
