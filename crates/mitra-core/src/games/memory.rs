//! Memory match: find the eight pairs on a shuffled 4x4 board.
//!
//! Flipping a second card locks the board until `settle()` is called; the
//! caller decides how long the pair stays visible before that.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// The symbols placed on the board, two of each.
pub const SYMBOLS: [&str; 8] = ["🌟", "💖", "🌈", "🦋", "🌸", "☀️", "🍀", "🎈"];

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryCard {
    pub id: usize,
    pub symbol: &'static str,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl MemoryCard {
    pub fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }
}

/// Result of a flip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The request was not allowed (board locked, card already face up or
    /// matched, or unknown id).
    Ignored,
    /// The first card of a pair was revealed.
    Revealed,
    /// The second card was revealed; the board waits for `settle()`.
    PairPending { matched: bool },
}

/// What `settle()` did with the pending pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// No pair was waiting.
    Nothing,
    Matched,
    Mismatched,
}

#[derive(Debug, Clone)]
pub struct MemoryBoard {
    cards: Vec<MemoryCard>,
    flipped: Vec<usize>,
    moves: u32,
    can_flip: bool,
}

impl MemoryBoard {
    /// Deals a fresh shuffled board.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Self {
            cards: Vec::new(),
            flipped: Vec::new(),
            moves: 0,
            can_flip: true,
        };
        board.new_game(rng);
        board
    }

    /// Reshuffles and clears all progress.
    pub fn new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut symbols: Vec<&'static str> = SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect();
        symbols.shuffle(rng);

        self.cards = symbols
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| MemoryCard {
                id,
                symbol,
                is_flipped: false,
                is_matched: false,
            })
            .collect();
        self.flipped.clear();
        self.moves = 0;
        self.can_flip = true;
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn can_flip(&self) -> bool {
        self.can_flip
    }

    /// Whether a revealed pair is waiting to be settled.
    pub fn has_pending_pair(&self) -> bool {
        self.flipped.len() == 2
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.is_matched)
    }

    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched).count() / 2
    }

    /// Turns a card face up.
    pub fn flip(&mut self, id: usize) -> FlipOutcome {
        if !self.can_flip || self.flipped.contains(&id) {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.cards.get_mut(id) else {
            return FlipOutcome::Ignored;
        };
        if card.is_face_up() {
            return FlipOutcome::Ignored;
        }

        card.is_flipped = true;
        self.flipped.push(id);

        if self.flipped.len() < 2 {
            return FlipOutcome::Revealed;
        }

        self.can_flip = false;
        self.moves += 1;
        FlipOutcome::PairPending {
            matched: self.pending_matches(),
        }
    }

    /// Resolves the pending pair and unlocks the board.
    pub fn settle(&mut self) -> SettleOutcome {
        if self.flipped.len() != 2 {
            return SettleOutcome::Nothing;
        }

        let matched = self.pending_matches();
        for id in self.flipped.drain(..) {
            let card = &mut self.cards[id];
            if matched {
                card.is_matched = true;
            } else {
                card.is_flipped = false;
            }
        }
        self.can_flip = true;

        if matched {
            SettleOutcome::Matched
        } else {
            SettleOutcome::Mismatched
        }
    }

    fn pending_matches(&self) -> bool {
        match self.flipped.as_slice() {
            [first, second] => self.cards[*first].symbol == self.cards[*second].symbol,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board() -> MemoryBoard {
        MemoryBoard::new(&mut StdRng::seed_from_u64(3))
    }

    /// Returns (a, b) card ids holding the same symbol, and a card `c`
    /// with a different symbol.
    fn pair_and_other(board: &MemoryBoard) -> (usize, usize, usize) {
        let cards = board.cards();
        let a = cards.iter().find(|c| !c.is_matched).unwrap();
        let b = cards
            .iter()
            .find(|c| c.id != a.id && c.symbol == a.symbol)
            .unwrap();
        let c = cards
            .iter()
            .find(|c| c.symbol != a.symbol && !c.is_matched)
            .unwrap();
        (a.id, b.id, c.id)
    }

    #[test]
    fn test_board_holds_each_symbol_twice() {
        let board = board();
        assert_eq!(board.cards().len(), 16);
        for symbol in SYMBOLS {
            let count = board.cards().iter().filter(|c| c.symbol == symbol).count();
            assert_eq!(count, 2, "symbol {}", symbol);
        }
        assert!(board.cards().iter().enumerate().all(|(i, c)| c.id == i));
        assert!(!board.is_complete());
    }

    #[test]
    fn test_matching_pair_stays_face_up() {
        let mut board = board();
        let (a, b, _) = pair_and_other(&board);

        assert_eq!(board.flip(a), FlipOutcome::Revealed);
        assert_eq!(board.flip(b), FlipOutcome::PairPending { matched: true });
        assert_eq!(board.moves(), 1);
        assert!(!board.can_flip());

        assert_eq!(board.settle(), SettleOutcome::Matched);
        assert!(board.can_flip());
        assert!(board.cards()[a].is_matched && board.cards()[b].is_matched);
        assert_eq!(board.matched_pairs(), 1);
    }

    #[test]
    fn test_mismatched_pair_flips_back() {
        let mut board = board();
        let (a, _, c) = pair_and_other(&board);

        board.flip(a);
        assert_eq!(board.flip(c), FlipOutcome::PairPending { matched: false });
        assert_eq!(board.settle(), SettleOutcome::Mismatched);
        assert!(!board.cards()[a].is_face_up());
        assert!(!board.cards()[c].is_face_up());
        assert_eq!(board.moves(), 1);
    }

    #[test]
    fn test_flips_are_ignored_while_locked_or_invalid() {
        let mut board = board();
        let (a, b, c) = pair_and_other(&board);

        assert_eq!(board.flip(99), FlipOutcome::Ignored);
        board.flip(a);
        assert_eq!(board.flip(a), FlipOutcome::Ignored);
        board.flip(c);
        assert_eq!(board.flip(b), FlipOutcome::Ignored);
        assert_eq!(board.moves(), 1);

        board.settle();
        board.flip(a);
        board.flip(b);
        board.settle();
        assert_eq!(board.flip(a), FlipOutcome::Ignored, "matched cards stay put");
    }

    #[test]
    fn test_settle_without_pair_is_noop() {
        let mut board = board();
        assert_eq!(board.settle(), SettleOutcome::Nothing);
        let (a, _, _) = pair_and_other(&board);
        board.flip(a);
        assert_eq!(board.settle(), SettleOutcome::Nothing);
        assert!(board.cards()[a].is_flipped);
    }

    #[test]
    fn test_completing_the_board() {
        let mut board = board();
        for _ in 0..SYMBOLS.len() {
            let (a, b, _) = match board.cards().iter().filter(|c| !c.is_matched).count() {
                2 => {
                    let rest: Vec<usize> = board
                        .cards()
                        .iter()
                        .filter(|c| !c.is_matched)
                        .map(|c| c.id)
                        .collect();
                    (rest[0], rest[1], 0)
                }
                _ => pair_and_other(&board),
            };
            board.flip(a);
            board.flip(b);
            board.settle();
        }
        assert!(board.is_complete());
        assert_eq!(board.moves(), 8);
        assert_eq!(board.matched_pairs(), 8);
    }

    #[test]
    fn test_new_game_clears_progress() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = MemoryBoard::new(&mut rng);
        let (a, c) = (0, 1);
        board.flip(a);
        board.flip(c);
        board.new_game(&mut rng);
        assert_eq!(board.moves(), 0);
        assert!(board.can_flip());
        assert!(!board.has_pending_pair());
        assert!(board.cards().iter().all(|card| !card.is_face_up()));
    }
}
