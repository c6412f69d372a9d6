//! The card-dealing collaborator (§5, §6): a shuffleable, cursor-based card
//! buffer shared by readers and writers under a reader-writer lock.
//!
//! [`Dealer`] owns a flat `Vec<Card>` and a `next` cursor. Dealing advances
//! the cursor; rewinding moves it back; peeking, swapping, and the
//! forward/reverse predicate search all read or mutate the buffer without
//! touching the cursor's meaning. Every public method takes its own lock, so
//! a caller never has to reason about lock ordering across calls.

use std::fmt::Write as _;
use std::sync::RwLock;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cards::{Card, Rank, Suit, BLACK_JOKER, RED_JOKER};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DealerError {
    #[error("index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("deck exhausted: {requested} cards requested, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
}

struct Inner {
    cards: Vec<Card>,
    next: usize,
}

/// A shared, lockable deck of cards with a dealing cursor.
///
/// Built from a raw card slice and a repeat count — `Dealer::new(deck, 1)`
/// deals a single standard deck; `Dealer::new(deck, 2)` concatenates two
/// copies for multi-deck games. All state lives behind a single `RwLock`, so
/// reads (peek, find, trace) can run concurrently with each other but block
/// writers (shuffle, deal, rewind, swap) and vice versa.
pub struct Dealer {
    inner: RwLock<Inner>,
}

impl Dealer {
    /// Builds a dealer from `deck_count` concatenated copies of `raw_deck`.
    pub fn new(raw_deck: &[Card], deck_count: usize) -> Self {
        let mut cards = Vec::with_capacity(raw_deck.len() * deck_count);
        for _ in 0..deck_count {
            cards.extend_from_slice(raw_deck);
        }
        Self { inner: RwLock::new(Inner { cards, next: 0 }) }
    }

    /// A dealer over a single standard 52-card deck.
    pub fn standard() -> Self {
        Self::new(&standard_deck(), 1)
    }

    /// Total number of cards in the buffer (dealt and undealt).
    pub fn total(&self) -> usize {
        self.inner.read().unwrap().cards.len()
    }

    /// Number of cards not yet dealt.
    pub fn left(&self) -> usize {
        let g = self.inner.read().unwrap();
        g.cards.len() - g.next
    }

    /// Shuffles the entire buffer in place and resets the dealing cursor to
    /// the front, using an OS-seeded RNG.
    pub fn shuffle(&self) {
        let mut rng = ChaCha8Rng::from_os_rng();
        self.shuffle_with(&mut rng);
    }

    /// Shuffles with a fixed seed, for reproducible tests.
    pub fn shuffle_seeded(&self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    fn shuffle_with<R: Rng + ?Sized>(&self, rng: &mut R) {
        let mut g = self.inner.write().unwrap();
        g.cards.shuffle(rng);
        g.next = 0;
    }

    /// Deals the next undealt card, advancing the cursor.
    pub fn deal_one(&self) -> Result<Card, DealerError> {
        let mut g = self.inner.write().unwrap();
        if g.next >= g.cards.len() {
            return Err(DealerError::DeckExhausted { requested: 1, remaining: 0 });
        }
        let card = g.cards[g.next];
        g.next += 1;
        Ok(card)
    }

    /// Deals `n` cards. On exhaustion, no cards are consumed (atomic w.r.t.
    /// the cursor) and the error reports how many were actually available.
    pub fn deal_n(&self, n: usize) -> Result<Vec<Card>, DealerError> {
        let mut g = self.inner.write().unwrap();
        let remaining = g.cards.len() - g.next;
        if n > remaining {
            return Err(DealerError::DeckExhausted { requested: n, remaining });
        }
        let out = g.cards[g.next..g.next + n].to_vec();
        g.next += n;
        Ok(out)
    }

    /// Moves the cursor back by `n` cards, "un-dealing" them. Saturates at 0.
    pub fn rewind(&self, n: usize) {
        let mut g = self.inner.write().unwrap();
        g.next = g.next.saturating_sub(n);
    }

    /// Reads the card at an absolute buffer index without affecting the
    /// cursor.
    pub fn peek(&self, index: usize) -> Result<Card, DealerError> {
        let g = self.inner.read().unwrap();
        g.cards
            .get(index)
            .copied()
            .ok_or(DealerError::IndexOutOfRange { index, len: g.cards.len() })
    }

    /// Swaps two cards by absolute buffer index.
    pub fn swap(&self, i: usize, j: usize) -> Result<(), DealerError> {
        let mut g = self.inner.write().unwrap();
        let len = g.cards.len();
        if i >= len {
            return Err(DealerError::IndexOutOfRange { index: i, len });
        }
        if j >= len {
            return Err(DealerError::IndexOutOfRange { index: j, len });
        }
        g.cards.swap(i, j);
        Ok(())
    }

    /// Searches forward from the cursor (inclusive) for the first card
    /// matching `pred`, returning its absolute index.
    pub fn find_forward(&self, mut pred: impl FnMut(Card) -> bool) -> Option<usize> {
        let g = self.inner.read().unwrap();
        (g.next..g.cards.len()).find(|&i| pred(g.cards[i]))
    }

    /// Searches backward from the end of the buffer down to the cursor
    /// (inclusive) for the first card matching `pred`, returning its
    /// absolute index.
    pub fn find_reverse(&self, mut pred: impl FnMut(Card) -> bool) -> Option<usize> {
        let g = self.inner.read().unwrap();
        (g.next..g.cards.len()).rev().find(|&i| pred(g.cards[i]))
    }

    /// A debug trace of every card's encoded byte, semicolon-separated.
    pub fn trace(&self) -> String {
        let g = self.inner.read().unwrap();
        let mut s = String::with_capacity(g.cards.len() * 4);
        for c in &g.cards {
            let _ = write!(s, "{};", c.encoded());
        }
        s
    }
}

/// The 52 standard playing cards, suit-major then rank-ascending.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for &s in &Suit::ALL {
        for &r in &Rank::ALL {
            cards.push(Card::new(r, s));
        }
    }
    cards
}

/// The standard 52 cards plus the Black and Red Jokers, kept as inert data
/// for callers outside the evaluator's scope (§3). The evaluator rejects
/// joker bytes as malformed input; this constructor exists only so a caller
/// building a Joker-inclusive variant has somewhere to get them.
pub fn standard_deck_with_jokers() -> Vec<(u8, Option<Card>)> {
    let mut out: Vec<(u8, Option<Card>)> =
        standard_deck().into_iter().map(|c| (c.encoded(), Some(c))).collect();
    out.push((BLACK_JOKER, None));
    out.push((RED_JOKER, None));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_dealer_has_52_cards() {
        let d = Dealer::standard();
        assert_eq!(d.total(), 52);
        assert_eq!(d.left(), 52);
    }

    #[test]
    fn multi_deck_concatenates_copies() {
        let d = Dealer::new(&standard_deck(), 2);
        assert_eq!(d.total(), 104);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let d1 = Dealer::standard();
        let d2 = Dealer::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        for i in 0..52 {
            assert_eq!(d1.peek(i).unwrap(), d2.peek(i).unwrap());
        }
    }

    #[test]
    fn deal_one_advances_cursor_and_reduces_left() {
        let d = Dealer::standard();
        d.shuffle_seeded(7);
        let c1 = d.deal_one().unwrap();
        let c2 = d.deal_one().unwrap();
        assert_ne!(c1, c2);
        assert_eq!(d.left(), 50);
    }

    #[test]
    fn deal_n_is_atomic_on_exhaustion() {
        let d = Dealer::standard();
        d.deal_n(50).unwrap();
        assert_eq!(d.left(), 2);
        let err = d.deal_n(5).unwrap_err();
        assert_eq!(err, DealerError::DeckExhausted { requested: 5, remaining: 2 });
        // no cards consumed by the failed attempt
        assert_eq!(d.left(), 2);
    }

    #[test]
    fn rewind_moves_cursor_back() {
        let d = Dealer::standard();
        let dealt = d.deal_n(5).unwrap();
        d.rewind(5);
        assert_eq!(d.left(), 52);
        let redealt = d.deal_n(5).unwrap();
        assert_eq!(dealt, redealt);
    }

    #[test]
    fn swap_exchanges_two_positions() {
        let d = Dealer::standard();
        let a = d.peek(0).unwrap();
        let b = d.peek(1).unwrap();
        d.swap(0, 1).unwrap();
        assert_eq!(d.peek(0).unwrap(), b);
        assert_eq!(d.peek(1).unwrap(), a);
    }

    #[test]
    fn peek_out_of_range_errors() {
        let d = Dealer::standard();
        assert!(matches!(d.peek(100), Err(DealerError::IndexOutOfRange { .. })));
    }

    #[test]
    fn find_forward_and_reverse_locate_by_predicate() {
        let d = Dealer::standard();
        let target = Card::new(Rank::Ace, Suit::Spades);
        let fwd = d.find_forward(|c| c == target).unwrap();
        let rev = d.find_reverse(|c| c == target).unwrap();
        assert_eq!(fwd, rev);
        assert_eq!(d.peek(fwd).unwrap(), target);
    }

    #[test]
    fn trace_lists_every_encoded_byte() {
        let d = Dealer::standard();
        let t = d.trace();
        assert_eq!(t.matches(';').count(), 52);
    }

    #[test]
    fn joker_deck_includes_two_sentinel_entries() {
        let withj = standard_deck_with_jokers();
        assert_eq!(withj.len(), 54);
        let jokers: Vec<_> = withj.iter().filter(|(_, c)| c.is_none()).collect();
        assert_eq!(jokers.len(), 2);
    }
}
