use crate::results::score_digits;
use crate::results::FeedbackScore;
use crate::results::SolverError;
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use std::fmt;
use std::result::Result;

/// A code is identified by its numeric value, e.g. `0123` is `123`.
pub type Code = u32;

/// The largest supported number of digits in a code.
pub const MAX_DIGITS: usize = 4;

/// The default number of digits in a code.
pub const DEFAULT_NUM_DIGITS: u8 = 4;

/// The decoded digits of a code.
///
/// Position 0 holds the least significant digit, so `1234` decodes to `[4, 3, 2, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digits {
    values: [u8; MAX_DIGITS],
    len: u8,
    /// Bit `n` is set iff digit `n` appears in the code.
    mask: u16,
}

impl Digits {
    /// The digits, least significant first.
    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.len as usize]
    }

    /// Returns true iff no digit appears twice.
    pub fn is_distinct(&self) -> bool {
        self.mask.count_ones() == self.len as u32
    }

    /// Counts the digit values that appear in both codes, ignoring position.
    pub fn num_shared_with(&self, other: &Digits) -> u8 {
        (self.mask & other.mask).count_ones() as u8
    }

    /// Determines the feedback this guess would receive if `objective` were the hidden code.
    ///
    /// Panics unless both codes have distinct digits.
    pub fn score_against(&self, objective: &Digits) -> FeedbackScore {
        score_digits(self, objective)
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.as_slice().iter().rev() {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

/// Decodes the lowest `num_digits` digits of `code`.
///
/// ```
/// use bulls_cows_solver::digits_of;
///
/// assert_eq!(digits_of(123, 4).as_slice(), &[3, 2, 1, 0]);
/// ```
pub fn digits_of(code: Code, num_digits: u8) -> Digits {
    assert!(
        num_digits as usize <= MAX_DIGITS,
        "codes have at most {} digits",
        MAX_DIGITS
    );
    let mut values = [0; MAX_DIGITS];
    let mut mask = 0u16;
    let mut remaining = code;
    for value in values.iter_mut().take(num_digits as usize) {
        *value = (remaining % 10) as u8;
        mask |= 1 << *value;
        remaining /= 10;
    }
    Digits {
        values,
        len: num_digits,
        mask,
    }
}

/// Returns true iff `code` is in range and its `num_digits` digits are pairwise distinct.
pub fn is_valid(code: Code, num_digits: u8) -> bool {
    num_digits >= 1
        && num_digits as usize <= MAX_DIGITS
        && code < universe_size(num_digits)
        && digits_of(code, num_digits).is_distinct()
}

fn universe_size(num_digits: u8) -> Code {
    10u32.pow(num_digits as u32)
}

/// Every code with distinct digits for a fixed number of digits.
///
/// Candidates are stored in ascending order, and each one is addressed by its index in that
/// order. All the precomputed tables in this crate are keyed by these indices.
#[derive(Debug, Clone)]
pub struct CandidateSpace {
    num_digits: u8,
    codes: Vec<Code>,
    digits: Vec<Digits>,
    index_by_code: Vec<Option<usize>>,
}

impl CandidateSpace {
    /// Enumerates the candidates with the given number of digits.
    ///
    /// ```
    /// use bulls_cows_solver::CandidateSpace;
    ///
    /// let space = CandidateSpace::new(4).unwrap();
    /// assert_eq!(space.len(), 5040);
    /// ```
    pub fn new(num_digits: u8) -> Result<CandidateSpace, SolverError> {
        if num_digits == 0 || num_digits as usize > MAX_DIGITS {
            return Err(SolverError::UnsupportedDigitCount(num_digits));
        }
        let codes: Vec<Code> = (0..universe_size(num_digits))
            .into_par_iter()
            .filter(|code| is_valid(*code, num_digits))
            .collect();
        let digits: Vec<Digits> = codes
            .iter()
            .map(|code| digits_of(*code, num_digits))
            .collect();
        let mut index_by_code = vec![None; universe_size(num_digits) as usize];
        for (index, code) in codes.iter().enumerate() {
            index_by_code[*code as usize] = Some(index);
        }
        Ok(CandidateSpace {
            num_digits,
            codes,
            digits,
            index_by_code,
        })
    }

    /// The number of digits in each code.
    pub fn num_digits(&self) -> u8 {
        self.num_digits
    }

    /// The number of valid candidates.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All valid codes, ascending.
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// The code at the given candidate index.
    pub fn code_at(&self, index: usize) -> Code {
        self.codes[index]
    }

    /// The decoded digits of the candidate at the given index.
    pub fn digits_at(&self, index: usize) -> &Digits {
        &self.digits[index]
    }

    /// Looks up the candidate index of `code`, or `None` if it is not a valid candidate.
    pub fn index_of(&self, code: Code) -> Option<usize> {
        self.index_by_code.get(code as usize).copied().flatten()
    }

    pub fn contains(&self, code: Code) -> bool {
        self.index_of(code).is_some()
    }

    /// Reads a code written with exactly `num_digits` digits, e.g. `"0123"`.
    pub fn parse_code(&self, text: &str) -> Result<Code, SolverError> {
        let text = text.trim();
        let invalid = || SolverError::InvalidCode(text.to_string());
        if text.len() != self.num_digits as usize || !text.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let code: Code = text.parse().map_err(|_| invalid())?;
        if !self.contains(code) {
            return Err(invalid());
        }
        Ok(code)
    }

    /// Picks a valid code uniformly at random.
    pub fn random_code<R: Rng + ?Sized>(&self, rng: &mut R) -> Code {
        *self
            .codes
            .choose(rng)
            .expect("there are always valid candidates")
    }

    /// Writes `code` zero-padded to the number of digits.
    pub fn format_code(&self, code: Code) -> String {
        format!("{:0width$}", code, width = self.num_digits as usize)
    }
}
