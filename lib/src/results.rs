use crate::data::digits_of;
use crate::data::Code;
use crate::data::Digits;
use crate::data::MAX_DIGITS;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::result::Result;
use thiserror::Error;

/// The number of distinct packed slots a [`FeedbackScore`] can occupy.
pub const NUM_SCORE_SLOTS: usize = (MAX_DIGITS + 1) * (MAX_DIGITS + 1);

/// The feedback given for a guess: how many digits are in the right place (`bulls`, the "A"
/// count), and how many are in the code but in another place (`cows`, the "B" count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedbackScore {
    pub bulls: u8,
    pub cows: u8,
}

impl FeedbackScore {
    /// Constructs a score, checking that it could be produced by a code with `num_digits` digits.
    ///
    /// ```
    /// use bulls_cows_solver::FeedbackScore;
    /// use bulls_cows_solver::SolverError;
    ///
    /// assert!(FeedbackScore::new(1, 2, 4).is_ok());
    /// assert!(matches!(
    ///     FeedbackScore::new(3, 2, 4),
    ///     Err(SolverError::InvalidFeedback { .. })
    /// ));
    /// ```
    pub fn new(bulls: u8, cows: u8, num_digits: u8) -> Result<FeedbackScore, SolverError> {
        if bulls as u16 + cows as u16 > num_digits as u16 {
            return Err(SolverError::InvalidFeedback {
                bulls,
                cows,
                num_digits,
            });
        }
        Ok(FeedbackScore { bulls, cows })
    }

    /// The score received when the guess is the code itself.
    pub fn solved(num_digits: u8) -> FeedbackScore {
        FeedbackScore {
            bulls: num_digits,
            cows: 0,
        }
    }

    /// Returns true iff this score means every digit is in the right place.
    pub fn is_solved(&self, num_digits: u8) -> bool {
        *self == FeedbackScore::solved(num_digits)
    }

    pub(crate) fn slot(&self) -> usize {
        self.bulls as usize * (MAX_DIGITS + 1) + self.cows as usize
    }

    pub(crate) fn from_slot(slot: u8) -> FeedbackScore {
        FeedbackScore {
            bulls: slot / (MAX_DIGITS as u8 + 1),
            cows: slot % (MAX_DIGITS as u8 + 1),
        }
    }
}

impl fmt::Display for FeedbackScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}A{}B", self.bulls, self.cows)
    }
}

/// Indicates that an error occurred while setting up or playing a game.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SolverError {
    /// The requested number of digits is not supported.
    #[error("codes must have between 1 and 4 digits, not {0}")]
    UnsupportedDigitCount(u8),
    /// The given code is not made of the expected number of distinct digits.
    #[error("{0} is not a code of distinct digits")]
    InvalidCode(String),
    /// The feedback text could not be read as two non-negative numbers.
    #[error("could not read feedback from {0:?}, expected two numbers such as \"1 2\"")]
    MalformedFeedback(String),
    /// The feedback could never be produced by a code of this length.
    #[error("{bulls}A{cows}B is impossible for codes with {num_digits} digits")]
    InvalidFeedback { bulls: u8, cows: u8, num_digits: u8 },
    /// A solver transition was used from the wrong state.
    #[error("the solver cannot {0} in its current state")]
    UnexpectedState(&'static str),
    /// The worker pool could not be created.
    #[error("failed to build the worker pool: {0}")]
    ThreadPool(String),
}

/// The outcome of a simulated game.
#[derive(Debug, Eq, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameResult {
    /// The secret was found. The last guess is the secret.
    Success { guesses: Vec<Code> },
    /// The secret was not found within the allowed number of rounds.
    Failure { guesses: Vec<Code> },
    /// No candidate is consistent with the feedback that was received.
    Contradiction { guesses: Vec<Code> },
}

impl GameResult {
    /// The guesses that were played, in order.
    pub fn guesses(&self) -> &[Code] {
        match self {
            GameResult::Success { guesses }
            | GameResult::Failure { guesses }
            | GameResult::Contradiction { guesses } => guesses,
        }
    }
}

/// Determines the feedback that `guess` receives when the hidden code is `objective`.
///
/// ```
/// use bulls_cows_solver::get_score_for_guess;
/// use bulls_cows_solver::FeedbackScore;
///
/// assert_eq!(
///     get_score_for_guess(1243, 1234, 4),
///     Ok(FeedbackScore { bulls: 2, cows: 2 })
/// );
/// ```
pub fn get_score_for_guess(
    objective: Code,
    guess: Code,
    num_digits: u8,
) -> Result<FeedbackScore, SolverError> {
    let objective_digits = checked_digits(objective, num_digits)?;
    let guess_digits = checked_digits(guess, num_digits)?;
    Ok(score_digits(&guess_digits, &objective_digits))
}

fn checked_digits(code: Code, num_digits: u8) -> Result<Digits, SolverError> {
    if num_digits == 0 || num_digits as usize > MAX_DIGITS {
        return Err(SolverError::UnsupportedDigitCount(num_digits));
    }
    if code >= 10u32.pow(num_digits as u32) {
        return Err(SolverError::InvalidCode(code.to_string()));
    }
    let digits = digits_of(code, num_digits);
    if !digits.is_distinct() {
        return Err(SolverError::InvalidCode(digits.to_string()));
    }
    Ok(digits)
}

/// Scores two codes of distinct digits.
///
/// Each shared digit value counts once: as a bull if it sits in the same position in both codes,
/// otherwise as a cow. Panics if either code repeats a digit.
pub(crate) fn score_digits(guess: &Digits, objective: &Digits) -> FeedbackScore {
    assert!(
        guess.is_distinct() && objective.is_distinct(),
        "cannot score {} against {}: digits must be distinct",
        guess,
        objective
    );
    let bulls = guess
        .as_slice()
        .iter()
        .zip(objective.as_slice())
        .filter(|(a, b)| a == b)
        .count() as u8;
    let shared = guess.num_shared_with(objective);
    FeedbackScore {
        bulls,
        cows: shared - bulls,
    }
}

/// Reads feedback typed by a player, either as two numbers (`"1 2"`) or in the `"1A2B"` form.
///
/// ```
/// use bulls_cows_solver::parse_feedback;
/// use bulls_cows_solver::FeedbackScore;
///
/// assert_eq!(parse_feedback(" 1  2 ", 4), Ok(FeedbackScore { bulls: 1, cows: 2 }));
/// assert_eq!(parse_feedback("0a3b", 4), Ok(FeedbackScore { bulls: 0, cows: 3 }));
/// ```
pub fn parse_feedback(input: &str, num_digits: u8) -> Result<FeedbackScore, SolverError> {
    let malformed = || SolverError::MalformedFeedback(input.trim().to_string());
    let parts: Vec<&str> = input.split_whitespace().collect();
    let (bulls, cows) = match parts.as_slice() {
        [bulls, cows] => (*bulls, *cows),
        [compact] => {
            let upper = compact.to_ascii_uppercase();
            let (bulls, rest) = upper.split_once('A').ok_or_else(malformed)?;
            let cows = rest.strip_suffix('B').ok_or_else(malformed)?;
            return FeedbackScore::new(
                bulls.parse().map_err(|_| malformed())?,
                cows.parse().map_err(|_| malformed())?,
                num_digits,
            );
        }
        _ => return Err(malformed()),
    };
    FeedbackScore::new(
        bulls.parse().map_err(|_| malformed())?,
        cows.parse().map_err(|_| malformed())?,
        num_digits,
    )
}
