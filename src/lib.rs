//! poker-core: the hand evaluator, win-rate analyzer, and side-pot
//! distributor at the core of a Texas Hold'em engine.
//!
//! Goals:
//! - Deterministic, fast evaluation for Texas Hold'em
//! - Small, well-documented public API
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use poker_core::cards::{Card, Rank, Suit};
//! use poker_core::evaluator::{evaluate_holdem, Category};
//! use poker_core::holdem::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::OnePair);
//! ```
//!
//! ## Quick start: win rate against a single opponent
//! ```
//! use poker_core::analyzer::win_rate;
//! use poker_core::cards::{Card, Rank, Suit};
//! use poker_core::holdem::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Nine, Suit::Diamonds),
//!     Card::new(Rank::Four, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let tally = win_rate(&hole, &board).unwrap();
//! assert!(tally.equity() > 0.5);
//! ```

pub mod analyzer;
pub mod cards;
pub mod dealer;
pub mod evaluator;
pub mod holdem;
pub mod pot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
