use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// Source of swap positions for the Fisher-Yates shuffle.
pub trait SwapSource {
    /// Returns an index in `0..=upper`, uniformly distributed for an unbiased shuffle.
    fn swap_index(&mut self, upper: usize) -> usize;
}

/// Unshuffled cards for `config`: pair `i` gets symbol `i % SYMBOLS_PER_THEME`, both copies adjacent.
///
/// Boards with more pairs than theme symbols reuse symbols across several pairs.
pub fn deck(config: GameConfig) -> Vec<SymbolIndex> {
    (0..usize::from(config.pair_count()))
        .flat_map(|pair| {
            let symbol = (pair % SYMBOLS_PER_THEME) as SymbolIndex;
            [symbol, symbol]
        })
        .collect()
}

/// In-place Fisher-Yates shuffle, walking `i` from the end down to 1.
pub fn shuffle<T>(items: &mut [T], source: &mut impl SwapSource) {
    for i in (1..items.len()).rev() {
        let j = source.swap_index(i);
        debug_assert!(j <= i, "swap index {j} outside 0..={i}");
        log::trace!("shuffle swap {} <-> {}", i, j);
        items.swap(i, j);
    }
}

/// Builds, shuffles and lays out a deck for `config`.
pub fn deal(config: GameConfig, source: &mut impl SwapSource) -> Result<Board> {
    let config = GameConfig::new(config.size, config.theme)?;
    let mut cards = deck(config);
    shuffle(&mut cards, source);
    Board::from_row_major(config.theme, config.size, cards)
}
