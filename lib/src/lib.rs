#![cfg_attr(feature = "unstable", feature(test))]

//! Solves Bulls and Cows (also known as 1A2B) puzzles.
//!
//! The secret is a code of distinct digits. Each guess is answered with the number of digits in
//! the right place (bulls, or "A") and the number of digits in the code but in the wrong place
//! (cows, or "B").
//!
//! Build the [`Precomputed`] data once, then play any number of games with a [`Solver`]:
//!
//! ```
//! use bulls_cows_solver::*;
//!
//! let precomputed = Precomputed::new(SolverConfig { num_digits: 3, num_threads: None })?;
//! let result = play_game(482, 10, &precomputed, MinimaxScorer)?;
//!
//! assert!(matches!(result, GameResult::Success { .. }));
//! assert_eq!(result.guesses().last(), Some(&482));
//! # Ok::<(), SolverError>(())
//! ```

mod config;
mod data;
mod engine;
mod matrix;
mod restrictions;
mod results;
pub mod scorers;

pub use config::*;
pub use data::*;
pub use engine::*;
pub use matrix::FeedbackMatrix;
pub use restrictions::PossibleSet;
pub use results::*;
pub use scorers::GuessScorer;
pub use scorers::MinimaxScorer;
pub use scorers::RankedGuess;
