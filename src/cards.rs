use std::fmt;
use std::str::FromStr;

/// A card's face value. Ace is the canonical low value (1); Jack/Queen/King
/// are 11/12/13. The evaluator internally re-maps Ace to 14 (and additionally
/// to 1 for the wheel) as a computed view inside `evaluator::hand::Hand`,
/// never as a mutation of `Rank` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// This rank's value with Ace counted high (14) instead of low (1). The
    /// evaluator's straight/sub-level arithmetic works in this space.
    pub const fn value_ace_high(self) -> u8 {
        match self {
            Rank::Ace => 14,
            other => other.value(),
        }
    }

    pub const fn from_value(v: u8) -> Option<Rank> {
        match v {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let upper = t.to_ascii_uppercase();
        let r = match upper.as_str() {
            "A" | "1" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            _ => return Err(RankParseError::Invalid(s.to_string())),
        };
        Ok(r)
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let up = c.to_ascii_uppercase();
        match up {
            'A' => Ok(Rank::Ace),
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            _ => Err(RankParseError::Invalid(c.to_string())),
        }
    }
}

/// A card's suit. Numbering follows the wire format: 1=Diamonds, 2=Clubs,
/// 3=Hearts, 4=Spades. Identity matters only for flush detection; there is
/// no suit-strength ordering in poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Diamonds = 1,
    Clubs = 2,
    Hearts = 3,
    Spades = 4,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn from_value(v: u8) -> Option<Suit> {
        match v {
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Clubs),
            3 => Some(Suit::Hearts),
            4 => Some(Suit::Spades),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.len() == 1 {
            return Suit::try_from(t.chars().next().unwrap());
        }
        match t.to_ascii_lowercase().as_str() {
            "diamonds" => Ok(Suit::Diamonds),
            "clubs" => Ok(Suit::Clubs),
            "hearts" => Ok(Suit::Hearts),
            "spades" => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

/// A playing card: rank + suit, packed into a single byte as `rank<<4 | suit`.
/// Two sentinel bytes (`BLACK_JOKER`, `RED_JOKER`) stand for the Jokers; they
/// round-trip through [`Card::encoded`]/[`Card::from_encoded`] but are never
/// produced by [`crate::evaluator`] and are rejected as evaluator input.
///
/// ```
/// use poker_core::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// assert_eq!(card.encoded(), 0x14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error("card byte {0:#04x} is not a playing card or joker")]
    InvalidEncoding(u8),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

/// Encoded byte of the Black Joker. Never produced by the evaluator.
pub const BLACK_JOKER: u8 = 0xE0;
/// Encoded byte of the Red Joker. Never produced by the evaluator.
pub const RED_JOKER: u8 = 0xF0;

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    pub const fn to_tuple(self) -> (Rank, Suit) {
        (self.rank, self.suit)
    }

    /// The compact single-byte encoding: `rank<<4 | suit`.
    pub const fn encoded(self) -> u8 {
        (self.rank.value() << 4) | self.suit.value()
    }

    /// Inverse of [`Card::encoded`]. Returns `None` for the joker sentinels
    /// or any byte that isn't a valid rank/suit pair.
    pub const fn from_encoded(byte: u8) -> Option<Card> {
        let rank = byte >> 4;
        let suit = byte & 0xF;
        match (Rank::from_value(rank), Suit::from_value(suit)) {
            (Some(rank), Some(suit)) => Some(Card { rank, suit }),
            _ => None,
        }
    }

    /// `"{rank*10 + suit}"` decimal front-string, e.g. Ace of Spades is
    /// `"14"`, Ten of Hearts is `"103"`.
    ///
    /// ```
    /// use poker_core::cards::{Card, Rank, Suit};
    ///
    /// assert_eq!(Card::new(Rank::Ace, Suit::Spades).front_string(), "14");
    /// assert_eq!(Card::new(Rank::Ten, Suit::Hearts).front_string(), "103");
    /// ```
    pub fn front_string(self) -> String {
        format!("{}", self.rank.value() as u32 * 10 + self.suit.value() as u32)
    }

    /// Inverse of [`Card::front_string`]: `suit = s mod 10`, `rank = s div 10`.
    /// Whitespace around `s` is trimmed.
    pub fn parse_front(s: &str) -> Result<Card, CardParseError> {
        let t = s.trim();
        let v: u32 = t.parse().map_err(|_| CardParseError::Invalid(s.to_string()))?;
        let suit_val = (v % 10) as u8;
        let rank_val = (v / 10) as u8;
        let rank =
            Rank::from_value(rank_val).ok_or_else(|| CardParseError::Invalid(s.to_string()))?;
        let suit =
            Suit::from_value(suit_val).ok_or_else(|| CardParseError::Invalid(s.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.len() < 2 {
            return Err(CardParseError::Invalid(s.to_string()));
        }

        let (rank_str, suit_ch) = if t.len() == 2 {
            (&t[..1], t.chars().nth(1).unwrap())
        } else if t.len() == 3 && t[..2].eq_ignore_ascii_case("10") {
            (&t[..2], t.chars().nth(2).unwrap())
        } else {
            (&t[..t.len() - 1], t.chars().last().unwrap())
        };

        let rank = Rank::from_str(rank_str)?;
        let suit = Suit::try_from(suit_ch)?;
        Ok(Card::new(rank, suit))
    }
}

/// Parse a front-string-encoded card list joined by `","` or `"-"`,
/// trimming whitespace around each token. Used for deck construction and by
/// the analyzer's dash-format inputs; the evaluator itself never parses
/// strings.
///
/// ```
/// use poker_core::cards::{parse_front_list, Card, Rank, Suit};
///
/// let cards = parse_front_list("14,131,21").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
/// assert_eq!(cards[2], Card::new(Rank::Two, Suit::Diamonds));
/// ```
pub fn parse_front_list(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c == ',' || c == '-')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Card::parse_front)
        .collect()
}

/// Parse a human-readable card list (e.g. `"As, Kd 10c"`), separated by
/// whitespace or commas.
///
/// ```
/// use poker_core::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd 10c").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}
