//! Per-category detection, tried in strict priority order (§4.2): Royal
//! Flush, Straight Flush, Four of a Kind, Full House, Flush, Straight,
//! Three of a Kind, Two Pairs, One Pair, High Card. Each function inspects
//! the hand's already-sorted `(showtime desc, rank desc)` cards and
//! precomputed masks, and on a match fills `category`, `sub_level`, and
//! `match_cards` before returning `true`. Detection short-circuits: the
//! first matching function in [`DETECTORS`] wins.

use super::hand::{turn_to_value, Hand};
use super::straight_table::STRAIGHT_MASKS;
use super::Category;
use crate::cards::{Card, Rank, Suit};

fn rank_from_straight_value(v: u8) -> Rank {
    if v == 1 || v == 14 {
        Rank::Ace
    } else {
        Rank::from_value(v).expect("straight table values are always valid ranks")
    }
}

/// For each suit with at least five cards, test the straight table's top
/// entry (10-J-Q-K-A). At most one suit can ever qualify: two suits with
/// five cards each would need ten cards, more than the evaluator ever sees.
fn try_royal_flush(h: &mut Hand) -> bool {
    let (royal_mask, _) = STRAIGHT_MASKS[0];
    for suit_val in 1..=4u8 {
        if h.suit_mask[suit_val as usize] & royal_mask == royal_mask {
            h.category = Category::RoyalFlush;
            h.sub_level = 0;
            let suit = Suit::from_value(suit_val).unwrap();
            for (i, v) in (10..=14u8).enumerate() {
                h.match_cards[i] = Card::new(rank_from_straight_value(v), suit);
            }
            return true;
        }
    }
    false
}

/// For each suit with at least five cards, test the remaining nine straight
/// table entries top-down (the royal entry was already ruled out).
fn try_straight_flush(h: &mut Hand) -> bool {
    for suit_val in 1..=4u8 {
        let mask = h.suit_mask[suit_val as usize];
        if (mask.count_ones() as usize) < 5 {
            continue;
        }
        for &(table_mask, high) in STRAIGHT_MASKS[1..].iter() {
            if mask & table_mask == table_mask {
                h.category = Category::StraightFlush;
                h.sub_level = high as u32;
                let suit = Suit::from_value(suit_val).unwrap();
                let low = if high == 5 { 1 } else { high - 4 };
                for (i, v) in (low..=high).enumerate() {
                    h.match_cards[i] = Card::new(rank_from_straight_value(v), suit);
                }
                return true;
            }
        }
    }
    false
}

/// Quads sort to the front: `cards[0].showtime == 4`.
fn try_four_of_a_kind(h: &mut Hand) -> bool {
    if h.showtime[0] == 4 {
        h.category = Category::FourOfAKind;
        h.append_first_n_to_match(4, 0);
        h.match_cards[4] = h.biggest_card_from(4);
        h.sub_level = turn_to_value(&h.match_cards);
        return true;
    }
    false
}

/// A trip at the front followed by a pair (or a second trip, the higher of
/// which the sort already placed first) at position 3.
fn try_full_house(h: &mut Hand) -> bool {
    if h.showtime[0] == 3 && h.showtime[3] >= 2 {
        h.category = Category::FullHouse;
        h.append_first_n_to_match(5, 0);
        h.sub_level = turn_to_value(&h.match_cards);
        return true;
    }
    false
}

/// The suit with `suit_count >= 5`; its five highest ranks by `suit_mask`.
fn try_flush(h: &mut Hand) -> bool {
    for suit_val in 1..=4u8 {
        if h.suit_count[suit_val as usize] >= 5 {
            h.category = Category::Flush;
            let suit = Suit::from_value(suit_val).unwrap();
            let mask = h.suit_mask[suit_val as usize];
            let mut count = 0;
            for value in (2..=14u8).rev() {
                if mask & (1 << value) != 0 {
                    h.match_cards[count] = Card::new(rank_from_straight_value(value), suit);
                    count += 1;
                    if count == 5 {
                        break;
                    }
                }
            }
            h.sub_level = turn_to_value(&h.match_cards);
            return true;
        }
    }
    false
}

/// `any_suit_mask` against the straight table, top-down; on a match, walk
/// the sorted input once collecting the first card seen at each required
/// rank (the wheel's Ace counts as rank 1, not 14, for this walk).
fn try_straight(h: &mut Hand) -> bool {
    for &(mask, high) in STRAIGHT_MASKS.iter() {
        if h.any_suit_mask & mask == mask {
            h.category = Category::Straight;
            h.sub_level = high as u32;
            let low = if high == 5 { 1 } else { high - 4 };
            let mut used = 0u16;
            let mut count = 0;
            for i in 0..h.len {
                if count == 5 {
                    break;
                }
                let rank_val = h.cards[i].rank().value_ace_high();
                let is_wheel_ace = high == 5 && rank_val == 14;
                let in_range = rank_val <= high && rank_val >= low;
                if in_range || is_wheel_ace {
                    let bit = if is_wheel_ace { 1u16 } else { 1u16 << rank_val };
                    if used & bit == 0 {
                        h.match_cards[count] = h.cards[i];
                        used |= bit;
                        count += 1;
                    }
                }
            }
            return true;
        }
    }
    false
}

/// Exactly one trip, no pair: `showtime[3] == showtime[4] == 1`.
fn try_three_of_a_kind(h: &mut Hand) -> bool {
    if h.showtime[0] == 3 && h.showtime[3] == 1 && h.showtime[4] == 1 {
        h.category = Category::ThreeOfAKind;
        h.append_first_n_to_match(5, 0);
        h.sub_level = turn_to_value(&h.match_cards);
        return true;
    }
    false
}

/// Two pairs at the front: `showtime[0] == showtime[2] == 2`.
fn try_two_pairs(h: &mut Hand) -> bool {
    if h.showtime[0] == 2 && h.showtime[2] == 2 {
        h.category = Category::TwoPairs;
        h.append_first_n_to_match(4, 0);
        h.match_cards[4] = h.biggest_card_from(4);
        h.sub_level = turn_to_value(&h.match_cards);
        return true;
    }
    false
}

fn try_one_pair(h: &mut Hand) -> bool {
    if h.showtime[0] == 2 {
        h.category = Category::OnePair;
        h.append_first_n_to_match(5, 0);
        h.sub_level = turn_to_value(&h.match_cards);
        return true;
    }
    false
}

/// Always matches: the fallback at the end of [`DETECTORS`].
fn try_high_card(h: &mut Hand) -> bool {
    h.category = Category::HighCard;
    h.append_first_n_to_match(5, 0);
    h.sub_level = turn_to_value(&h.match_cards);
    true
}

/// The full detector list, highest category first. `Hand::evaluate` calls
/// these in order and stops at the first match; `try_high_card` always
/// matches, so the loop never falls through.
pub(crate) const DETECTORS: [fn(&mut Hand) -> bool; 10] = [
    try_royal_flush,
    try_straight_flush,
    try_four_of_a_kind,
    try_full_house,
    try_flush,
    try_straight,
    try_three_of_a_kind,
    try_two_pairs,
    try_one_pair,
    try_high_card,
];
