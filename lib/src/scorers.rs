use crate::data::CandidateSpace;
use crate::data::Code;
use crate::matrix::FeedbackMatrix;
use crate::restrictions::PossibleSet;
use crate::results::FeedbackScore;
use crate::results::NUM_SCORE_SLOTS;
use dyn_clone::DynClone;
use rayon::prelude::*;
use rayon::ThreadPool;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gives guesses a score, where the minimum score indicates the best guess.
///
/// A guess splits the possible codes into buckets, one per feedback score it could receive.
/// Scorers turn those bucket sizes into a single number. They must be pure functions of the
/// guess, the possible set, and the matrix, so that ranking can be done in parallel.
///
/// Use [`MinimaxScorer`] to bound the worst case, or [`ExpectedSizeScorer`] to favour the
/// average case. Run the `benchmark` command of the binary to compare them.
pub trait GuessScorer: DynClone + Send + Sync {
    /// Determines a score for the guess at `guess_index`. The lower the score, the better the
    /// guess.
    fn score_guess(&self, guess_index: usize, possible: &PossibleSet, matrix: &FeedbackMatrix)
        -> u64;
}

dyn_clone::clone_trait_object!(GuessScorer);

impl GuessScorer for Box<dyn GuessScorer> {
    fn score_guess(
        &self,
        guess_index: usize,
        possible: &PossibleSet,
        matrix: &FeedbackMatrix,
    ) -> u64 {
        (**self).score_guess(guess_index, possible, matrix)
    }
}

/// Scores a guess by the size of its largest bucket, i.e. the number of codes that could still be
/// possible after this guess in the worst case.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxScorer;

impl GuessScorer for MinimaxScorer {
    fn score_guess(
        &self,
        guess_index: usize,
        possible: &PossibleSet,
        matrix: &FeedbackMatrix,
    ) -> u64 {
        bucket_sizes(guess_index, possible, matrix)
            .into_iter()
            .max()
            .unwrap_or(0) as u64
    }
}

/// Scores a guess by the sum of its squared bucket sizes.
///
/// Dividing by the number of possible codes gives the expected number of codes left after the
/// guess, assuming every possible code is equally likely to be the secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedSizeScorer;

impl GuessScorer for ExpectedSizeScorer {
    fn score_guess(
        &self,
        guess_index: usize,
        possible: &PossibleSet,
        matrix: &FeedbackMatrix,
    ) -> u64 {
        bucket_sizes(guess_index, possible, matrix)
            .into_iter()
            .map(|size| size as u64 * size as u64)
            .sum()
    }
}

fn bucket_sizes(
    guess_index: usize,
    possible: &PossibleSet,
    matrix: &FeedbackMatrix,
) -> [u32; NUM_SCORE_SLOTS] {
    let scores = matrix.row(guess_index);
    let mut sizes = [0u32; NUM_SCORE_SLOTS];
    for index in possible.members() {
        sizes[scores[*index] as usize] += 1;
    }
    sizes
}

/// Splits the possible codes by the feedback they would give to this guess.
///
/// Returns each feedback score that at least one possible code would give, with the number of
/// such codes, ordered by score.
pub fn partition_sizes(
    guess_index: usize,
    possible: &PossibleSet,
    matrix: &FeedbackMatrix,
) -> Vec<(FeedbackScore, usize)> {
    bucket_sizes(guess_index, possible, matrix)
        .into_iter()
        .enumerate()
        .filter(|(_, size)| *size > 0)
        .map(|(slot, size)| (FeedbackScore::from_slot(slot as u8), size as usize))
        .collect()
}

/// A candidate guess along with how it was ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedGuess {
    pub code: Code,
    /// The candidate index of the code.
    pub index: usize,
    /// The scorer's score. Lower is better.
    pub score: u64,
    /// Whether this code could itself be the secret.
    pub is_possible: bool,
}

impl RankedGuess {
    /// Ties are broken in favour of codes that might win immediately, then by the lowest code.
    fn sort_key(&self) -> (u64, bool, Code) {
        (self.score, !self.is_possible, self.code)
    }
}

fn rank_one<S>(
    index: usize,
    possible: &PossibleSet,
    matrix: &FeedbackMatrix,
    space: &CandidateSpace,
    scorer: &S,
) -> RankedGuess
where
    S: GuessScorer + ?Sized,
{
    RankedGuess {
        code: space.code_at(index),
        index,
        score: scorer.score_guess(index, possible, matrix),
        is_possible: possible.contains(index),
    }
}

/// Ranks every candidate in `space` as the next guess, best first.
///
/// All candidates are considered, not just the possible ones, since an impossible code can still
/// split the possible codes best. The ranking is computed on `pool` and is deterministic.
///
/// Panics if `possible` is empty.
pub fn rank_guesses<S>(
    possible: &PossibleSet,
    matrix: &FeedbackMatrix,
    space: &CandidateSpace,
    pool: &ThreadPool,
    scorer: &S,
) -> Vec<RankedGuess>
where
    S: GuessScorer + ?Sized,
{
    assert!(!possible.is_empty(), "cannot rank guesses without possible codes");
    pool.install(|| {
        let mut ranking: Vec<RankedGuess> = (0..space.len())
            .into_par_iter()
            .map(|index| rank_one(index, possible, matrix, space, scorer))
            .collect();
        ranking.par_sort_unstable_by_key(RankedGuess::sort_key);
        ranking
    })
}

/// Selects the best next guess, as the first entry of [`rank_guesses`] would be.
///
/// Panics if `possible` is empty.
pub fn select_guess<S>(
    possible: &PossibleSet,
    matrix: &FeedbackMatrix,
    space: &CandidateSpace,
    pool: &ThreadPool,
    scorer: &S,
) -> RankedGuess
where
    S: GuessScorer + ?Sized,
{
    assert!(!possible.is_empty(), "cannot select a guess without possible codes");
    pool.install(|| {
        (0..space.len())
            .into_par_iter()
            .map(|index| rank_one(index, possible, matrix, space, scorer))
            .min_by_key(RankedGuess::sort_key)
    })
    .expect("the candidate space is never empty")
}
