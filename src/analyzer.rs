//! The win-rate analyzer (§4.3): given a player's two hole cards and 0-5
//! known community cards, enumerate every legal completion (the opponent's
//! two hole cards, and any missing community cards) and report the fraction
//! of completions the player wins or ties against a single opponent.
//!
//! The reference source only enumerates correctly when `|community|` is 3
//! (turn+river+opponent, a four-deep nested loop with strict index ordering)
//! or 5 (opponent only); the spec's Open Question mandates generalizing to
//! any `|community| in 0..=5`. This implementation draws the missing board
//! cards and the opponent's hole cards as unordered combinations of whatever
//! remains in the deck, so every community length is handled by the same
//! code path.

use std::cmp::Ordering;

use crate::cards::{parse_front_list, Card, CardParseError};
use crate::dealer::standard_deck;
use crate::evaluator::hand::Hand;
use crate::holdem::{validate_holdem, Board, HandError, HoleCards};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnalyzerError {
    #[error("invalid hold'em state: {0}")]
    InvalidState(#[from] HandError),
    #[error("win-rate query must split into exactly 3 ':'-separated segments with a trailing empty one, got {0:?}")]
    MalformedQuery(String),
    #[error(transparent)]
    CardParse(#[from] CardParseError),
}

/// Tally of completions from a win-rate enumeration (§4.3). `total()`
/// completions is the enumerator's denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinRate {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
}

impl WinRate {
    pub const fn total(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// `(wins + ties) / total`. `NaN` if the enumerator produced zero
    /// completions — §4.3 leaves this case undefined and permits `NaN`.
    pub fn equity(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return f64::NAN;
        }
        (self.wins + self.ties) as f64 / total as f64
    }
}

/// Enumerates every legal opponent hand, and every legal completion of the
/// board if `community.len() < 5`, comparing the player's best hand against
/// the opponent's on each completion. Both working [`Hand`]s are reused
/// across the whole enumeration with `need_cal_index` off, matching §4.3's
/// performance contract: no `match_flag` bookkeeping, no reallocation per
/// completion.
pub fn win_rate(hole: &HoleCards, community: &Board) -> Result<WinRate, AnalyzerError> {
    validate_holdem(hole, community)?;

    let mut used = [false; 256];
    for c in hole.as_array() {
        used[c.encoded() as usize] = true;
    }
    for &c in community.as_slice() {
        used[c.encoded() as usize] = true;
    }
    let remaining: Vec<Card> =
        standard_deck().into_iter().filter(|c| !used[c.encoded() as usize]).collect();

    let missing_board = 5 - community.len();
    let mut tally = WinRate::default();
    let mut player_hand = Hand::with_cal_index(false);
    let mut opp_hand = Hand::with_cal_index(false);

    for board_extra in Combinations::new(remaining.len(), missing_board) {
        let mut full_board = [hole.first(); 5];
        for (slot, &c) in community.as_slice().iter().enumerate() {
            full_board[slot] = c;
        }
        for (slot, &idx) in board_extra.iter().enumerate() {
            full_board[community.len() + slot] = remaining[idx];
        }

        let mut excluded = vec![false; remaining.len()];
        for &idx in &board_extra {
            excluded[idx] = true;
        }
        let rest: Vec<Card> =
            remaining.iter().enumerate().filter(|(i, _)| !excluded[*i]).map(|(_, &c)| c).collect();

        for opp_idx in Combinations::new(rest.len(), 2) {
            let opp = [rest[opp_idx[0]], rest[opp_idx[1]]];

            let player7 = [
                hole.first(),
                hole.second(),
                full_board[0],
                full_board[1],
                full_board[2],
                full_board[3],
                full_board[4],
            ];
            let opp7 = [
                opp[0],
                opp[1],
                full_board[0],
                full_board[1],
                full_board[2],
                full_board[3],
                full_board[4],
            ];

            player_hand.evaluate(&player7).expect("seven cards is always a valid length");
            opp_hand.evaluate(&opp7).expect("seven cards is always a valid length");

            match player_hand.final_strength().cmp(&opp_hand.final_strength()) {
                Ordering::Greater => tally.wins += 1,
                Ordering::Equal => tally.ties += 1,
                Ordering::Less => tally.losses += 1,
            }
        }
    }

    Ok(tally)
}

/// Parses the win-rate query format (§6): `"<player>:<community>:"`, each of
/// `<player>` and `<community>` a dash-separated card list, with a required
/// trailing empty segment (exactly three `":"`-separated parts).
pub fn parse_query(s: &str) -> Result<(HoleCards, Board), AnalyzerError> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 || !parts[2].is_empty() {
        return Err(AnalyzerError::MalformedQuery(s.to_string()));
    }
    let hole = HoleCards::from_slice(&parse_front_list(parts[0])?)?;
    let board = Board::try_new(parse_front_list(parts[1])?)?;
    Ok((hole, board))
}

/// Lexicographic iterator over `k`-element index subsets of `0..n`, yielding
/// each combination as a `Vec<usize>` of ascending indices. Generalizes the
/// reference source's hand-unrolled 4-deep nested loops (§4.3) to any `n`,
/// `k`; `k == 0` yields a single empty combination, and `k > n` yields none.
pub(crate) struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        Self { n, k, indices: (0..k).collect(), started: false, done: k > n }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if self.k == 0 {
            self.done = true;
            return Some(Vec::new());
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let mut i = self.k - 1;
        loop {
            if self.indices[i] != i + self.n - self.k {
                self.indices[i] += 1;
                for j in i + 1..self.k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return Some(self.indices.clone());
            }
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn n_choose_k(n: u64, k: u64) -> u64 {
        if k > n {
            return 0;
        }
        let mut num = 1u64;
        let mut den = 1u64;
        for i in 0..k {
            num *= n - i;
            den *= i + 1;
        }
        num / den
    }

    #[test]
    fn combinations_count_matches_binomial_coefficient() {
        for &(n, k) in &[(5usize, 2usize), (7, 3), (10, 0), (4, 4), (6, 7)] {
            let count = Combinations::new(n, k).count() as u64;
            assert_eq!(count, n_choose_k(n as u64, k as u64), "n={n} k={k}");
        }
    }

    #[test]
    fn combinations_are_distinct_and_sorted() {
        for combo in Combinations::new(6, 3) {
            assert_eq!(combo.len(), 3);
            assert!(combo.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn combinations_zero_k_yields_one_empty_combination() {
        let all: Vec<_> = Combinations::new(5, 0).collect();
        assert_eq!(all, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn combinations_k_greater_than_n_yields_nothing() {
        assert_eq!(Combinations::new(3, 5).count(), 0);
    }

    fn hole(a: Card, b: Card) -> HoleCards {
        HoleCards::try_new(a, b).unwrap()
    }

    #[test]
    fn river_enumerates_exactly_remaining_choose_two_opponents() {
        let hole = hole(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts));
        let board = Board::try_new(vec![
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Diamonds),
            Card::new(Rank::Jack, Suit::Hearts),
            Card::new(Rank::Three, Suit::Spades),
            Card::new(Rank::Two, Suit::Clubs),
        ])
        .unwrap();
        let tally = win_rate(&hole, &board).unwrap();
        assert_eq!(tally.total(), n_choose_k(45, 2));
    }

    #[test]
    fn turn_enumerates_over_both_the_river_and_the_opponent() {
        let hole = hole(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts));
        let board = Board::try_new(vec![
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Diamonds),
            Card::new(Rank::Jack, Suit::Hearts),
            Card::new(Rank::Three, Suit::Spades),
        ])
        .unwrap();
        let tally = win_rate(&hole, &board).unwrap();
        // one river card from 46, then an opponent pair from the other 45
        assert_eq!(tally.total(), 46 * n_choose_k(45, 2));
    }

    #[test]
    fn flop_generalizes_to_two_missing_board_cards() {
        let hole = hole(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts));
        let board = Board::try_new(vec![
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Diamonds),
            Card::new(Rank::Jack, Suit::Hearts),
        ])
        .unwrap();
        let tally = win_rate(&hole, &board).unwrap();
        assert_eq!(tally.total(), n_choose_k(47, 2) * n_choose_k(45, 2));
    }

    #[test]
    fn equity_stays_within_the_unit_interval() {
        let hole = hole(Card::new(Rank::Seven, Suit::Clubs), Card::new(Rank::Two, Suit::Diamonds));
        let board = Board::try_new(vec![
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Diamonds),
            Card::new(Rank::Jack, Suit::Hearts),
            Card::new(Rank::Three, Suit::Spades),
            Card::new(Rank::Two, Suit::Clubs),
        ])
        .unwrap();
        let tally = win_rate(&hole, &board).unwrap();
        let equity = tally.equity();
        assert!((0.0..=1.0).contains(&equity));
    }

    #[test]
    fn pocket_aces_on_a_dry_river_wins_far_more_than_it_loses() {
        let hole = hole(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts));
        let board = Board::try_new(vec![
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Diamonds),
            Card::new(Rank::Four, Suit::Hearts),
            Card::new(Rank::Three, Suit::Spades),
            Card::new(Rank::Two, Suit::Clubs),
        ])
        .unwrap();
        let tally = win_rate(&hole, &board).unwrap();
        assert!(tally.wins > tally.losses);
    }

    #[test]
    fn parse_query_round_trips_the_dash_format() {
        // "14" = Ace of Spades, "134" = King of Spades (rank*10 + suit).
        let (hole, board) = parse_query("14-134-:131-121-113-34-22:").unwrap();
        assert_eq!(hole.first(), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(hole.second(), Card::new(Rank::King, Suit::Spades));
        assert_eq!(board.len(), 5);
    }

    #[test]
    fn parse_query_rejects_missing_trailing_segment() {
        assert!(matches!(parse_query("14-13-:121-131-:extra"), Err(AnalyzerError::MalformedQuery(_))));
        assert!(matches!(parse_query("14-13-:121-131-"), Err(AnalyzerError::MalformedQuery(_))));
    }
}
