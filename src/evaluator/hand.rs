//! The evaluator's mutable working object (§3). A `Hand` is built once and
//! `reset`/re-evaluated in a loop without reallocating — the analyzer
//! depends on this for its tight inner loop over millions of completions.

use crate::cards::{Card, Rank, Suit};
use crate::evaluator::Category;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("evaluator needs 5 to 7 cards, got {0}")]
    InvalidCardCount(usize),
}

/// `rank<<4 | suit` fits in a `u8`, so the `card_encoded -> original_index`
/// map from §9's design notes is a flat 256-entry array instead of a hash
/// map — only populated when `need_cal_index` is set.
const INDEX_TABLE_SIZE: usize = 256;

/// Working state for a single evaluation. Carries the sorted input, the
/// per-suit and per-rank bitmasks, and (once evaluated) the category,
/// sub-level tiebreak, winning five cards, and origin-index flag.
pub struct Hand {
    pub(crate) cards: [Card; 7],
    pub(crate) showtime: [u8; 7],
    pub(crate) len: usize,

    /// Indexed 1..=4 (index 0 unused); count of cards per suit.
    pub(crate) suit_count: [u16; 5],
    /// Indexed 1..=14 (index 0 unused, index 1 unused at this level since
    /// Ace is counted at 14); count of cards per rank.
    pub(crate) val_count: [u16; 15],
    /// Indexed 1..=4 (index 0 unused); per-suit rank-presence bitmask, with
    /// bit 1 additionally set whenever bit 14 (Ace) is set (the wheel trick).
    pub(crate) suit_mask: [u16; 5],
    pub(crate) any_suit_mask: u16,

    pub(crate) category: Category,
    pub(crate) sub_level: u32,
    pub(crate) match_cards: [Card; 5],
    pub(crate) match_flag: u32,

    need_cal_index: bool,
    index_lookup: Vec<i16>,
}

impl Hand {
    /// A fresh hand that computes `match_flag` (the default, matching the
    /// reference evaluator's default behavior).
    pub fn new() -> Self {
        Self::with_cal_index(true)
    }

    /// A fresh hand with explicit control over whether `match_flag` is
    /// computed. The analyzer's hot loop sets this to `false`.
    pub fn with_cal_index(need_cal_index: bool) -> Self {
        let index_lookup = if need_cal_index { vec![-1i16; INDEX_TABLE_SIZE] } else { Vec::new() };
        Self {
            cards: [Card::new(Rank::Two, Suit::Clubs); 7],
            showtime: [0; 7],
            len: 0,
            suit_count: [0; 5],
            val_count: [0; 15],
            suit_mask: [0; 5],
            any_suit_mask: 0,
            category: Category::HighCard,
            sub_level: 0,
            match_cards: [Card::new(Rank::Two, Suit::Clubs); 5],
            match_flag: 0,
            need_cal_index,
            index_lookup,
        }
    }

    pub fn need_cal_index(&self) -> bool {
        self.need_cal_index
    }

    /// Clears counters, masks, and result fields without freeing buffers,
    /// so the same `Hand` can be re-evaluated in a tight loop.
    pub fn reset(&mut self) {
        self.suit_count = [0; 5];
        self.val_count = [0; 15];
        self.suit_mask = [0; 5];
        self.any_suit_mask = 0;
        self.showtime = [0; 7];
        self.len = 0;
        self.category = Category::HighCard;
        self.sub_level = 0;
        self.match_flag = 0;
        if self.need_cal_index {
            for slot in self.index_lookup.iter_mut() {
                *slot = -1;
            }
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sub_level(&self) -> u32 {
        self.sub_level
    }

    pub fn match_cards(&self) -> &[Card; 5] {
        &self.match_cards
    }

    pub fn match_flag(&self) -> u32 {
        self.match_flag
    }

    /// `(category << 20) | sub_level` (§3): totally orders any two evaluated
    /// hands, with category strictly dominating sub_level.
    pub fn final_strength(&self) -> u32 {
        ((self.category as u32) << 20) | self.sub_level
    }

    /// Populates this hand from 5, 6, or 7 cards and determines its
    /// category, sub-level, winning five cards, and (if `need_cal_index`)
    /// match flag. Returns an error and leaves the hand in an undefined
    /// state if `cards.len()` is outside `5..=7`.
    pub fn evaluate(&mut self, cards: &[Card]) -> Result<(), EvalError> {
        if cards.len() < 5 || cards.len() > 7 {
            return Err(EvalError::InvalidCardCount(cards.len()));
        }
        self.reset();
        self.len = cards.len();
        self.cards[..self.len].copy_from_slice(cards);

        for (i, &c) in cards.iter().enumerate() {
            let suit = c.suit().value() as usize;
            let rank = c.rank().value_ace_high() as usize;
            self.suit_count[suit] += 1;
            self.suit_mask[suit] |= 1 << rank;
            self.any_suit_mask |= 1 << rank;
            if rank == 14 {
                self.suit_mask[suit] |= 1 << 1;
                self.any_suit_mask |= 1 << 1;
            }
            self.val_count[rank] += 1;
            if self.need_cal_index {
                self.index_lookup[c.encoded() as usize] = i as i16;
            }
        }

        for i in 0..self.len {
            let rank = self.cards[i].rank().value_ace_high() as usize;
            self.showtime[i] = self.val_count[rank] as u8;
        }

        self.sort_by_showtime_then_rank();
        self.detect_category();
        self.compute_match_flag();
        Ok(())
    }

    /// Sorts the populated input by `(showtime desc, rank desc)` (§4.2),
    /// the ordering every category check inspects as fixed positions.
    fn sort_by_showtime_then_rank(&mut self) {
        let mut combined: [(Card, u8); 7] = [(self.cards[0], self.showtime[0]); 7];
        for i in 0..self.len {
            combined[i] = (self.cards[i], self.showtime[i]);
        }
        // Stable: cards tied on (showtime, rank) must keep their input order,
        // since match_flag() reports positions in terms of that input order.
        combined[..self.len].sort_by(|a, b| {
            b.1.cmp(&a.1).then_with(|| {
                b.0.rank().value_ace_high().cmp(&a.0.rank().value_ace_high())
            })
        });
        for i in 0..self.len {
            self.cards[i] = combined[i].0;
            self.showtime[i] = combined[i].1;
        }
    }

    fn detect_category(&mut self) {
        use super::detector::DETECTORS;
        for detect in DETECTORS.iter() {
            if detect(self) {
                return;
            }
        }
        unreachable!("try_high_card always matches");
    }

    fn compute_match_flag(&mut self) {
        if !self.need_cal_index {
            return;
        }
        let mut flag = 0u32;
        for card in self.match_cards.iter() {
            let idx = self.index_lookup[card.encoded() as usize];
            if idx >= 0 {
                flag |= 1 << idx;
            }
        }
        self.match_flag = flag;
    }

    /// Copies the first `n` sorted input cards into `match_cards`, the
    /// common "first five sorted" shape used by full house, trips, two
    /// pair, pair, and high card.
    pub(crate) fn append_first_n_to_match(&mut self, n: usize, offset: usize) {
        for i in 0..n {
            self.match_cards[offset + i] = self.cards[i];
        }
    }

    /// The single highest-ranked card among `self.cards[from..self.len]`.
    pub(crate) fn biggest_card_from(&self, from: usize) -> Card {
        let mut best = self.cards[from];
        for &c in &self.cards[from..self.len] {
            if c.rank().value_ace_high() >= best.rank().value_ace_high() {
                best = c;
            }
        }
        best
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

/// Packs up to five ranks (Ace high) into a 20-bit tiebreaker: `sub_level =
/// r1<<16 | r2<<12 | r3<<8 | r4<<4 | r5` (§4.2 `turn_to_value`).
pub(crate) fn turn_to_value(cards: &[Card]) -> u32 {
    let mut res = 0u32;
    for c in cards {
        res = (res << 4) | c.rank().value_ace_high() as u32;
    }
    res
}
