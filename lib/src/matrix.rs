use crate::data::CandidateSpace;
use crate::results::FeedbackScore;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::time::Instant;

/// The feedback between every pair of candidates, keyed by candidate index.
///
/// Scores are stored packed into one byte each, in a dense `n * n` table. Since the feedback
/// between two codes of distinct digits does not depend on which one is the guess, only the upper
/// triangle is computed and the rest is mirrored from it.
///
/// This is expensive to build: about 25 million pairs for 4-digit codes. Build it once and share
/// it by reference.
#[derive(Debug, Clone)]
pub struct FeedbackMatrix {
    num_candidates: usize,
    slots: Vec<u8>,
}

impl FeedbackMatrix {
    /// Computes the feedback between every pair of candidates in `space`, using the given pool.
    pub fn precompute(space: &CandidateSpace, pool: &ThreadPool) -> FeedbackMatrix {
        let start = Instant::now();
        let matrix = pool.install(|| FeedbackMatrix::compute(space));
        log::info!(
            "precomputed {} feedback scores in {:.3}s",
            matrix.slots.len(),
            start.elapsed().as_secs_f64()
        );
        matrix
    }

    fn compute(space: &CandidateSpace) -> FeedbackMatrix {
        let n = space.len();
        let mut slots = vec![0u8; n * n];
        if n == 0 {
            return FeedbackMatrix {
                num_candidates: n,
                slots,
            };
        }
        slots
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(row, cells)| {
                let guess = space.digits_at(row);
                for (column, cell) in cells.iter_mut().enumerate().skip(row) {
                    *cell = guess.score_against(space.digits_at(column)).slot() as u8;
                }
            });
        // Copy the upper triangle into the lower one, in place.
        for row in 1..n {
            let (above, rest) = slots.split_at_mut(row * n);
            for (column, cell) in rest[..row].iter_mut().enumerate() {
                *cell = above[column * n + row];
            }
        }
        FeedbackMatrix {
            num_candidates: n,
            slots,
        }
    }

    /// The number of candidates along each side of the matrix.
    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    /// The feedback that the guess at `guess_index` receives if the code at `objective_index` is
    /// the secret.
    pub fn score(&self, guess_index: usize, objective_index: usize) -> FeedbackScore {
        FeedbackScore::from_slot(self.slot(guess_index, objective_index))
    }

    /// Packed form of [`FeedbackMatrix::score`], suitable for bucketing.
    pub(crate) fn slot(&self, guess_index: usize, objective_index: usize) -> u8 {
        self.row(guess_index)[objective_index]
    }

    /// All packed scores for one guess.
    pub(crate) fn row(&self, guess_index: usize) -> &[u8] {
        assert!(
            guess_index < self.num_candidates,
            "candidate index {} out of range",
            guess_index
        );
        let start = guess_index * self.num_candidates;
        &self.slots[start..start + self.num_candidates]
    }
}
