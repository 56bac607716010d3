use crate::matrix::FeedbackMatrix;
use crate::results::FeedbackScore;

/// The candidates that are still consistent with every piece of feedback seen in this game.
///
/// Candidates are tracked by index into the [`CandidateSpace`](crate::CandidateSpace). Members are
/// kept in ascending index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossibleSet {
    members: Vec<usize>,
    is_member: Vec<bool>,
    history: Vec<(usize, FeedbackScore)>,
}

impl PossibleSet {
    /// Creates a set containing all `num_candidates` candidates.
    pub fn new(num_candidates: usize) -> PossibleSet {
        PossibleSet {
            members: (0..num_candidates).collect(),
            is_member: vec![true; num_candidates],
            history: Vec::new(),
        }
    }

    /// Makes every candidate possible again and forgets all feedback.
    pub fn reset(&mut self) {
        let num_candidates = self.is_member.len();
        self.members = (0..num_candidates).collect();
        self.is_member.fill(true);
        self.history.clear();
    }

    /// Removes every candidate that would not have produced `observed` in response to the guess.
    ///
    /// The guess itself is only removed if it is inconsistent, so a winning guess stays in the
    /// set as its only member.
    pub fn reduce(&mut self, matrix: &FeedbackMatrix, guess_index: usize, observed: FeedbackScore) {
        let observed_slot = observed.slot() as u8;
        let scores = matrix.row(guess_index);
        let is_member = &mut self.is_member;
        self.members.retain(|index| {
            let keep = scores[*index] == observed_slot;
            if !keep {
                is_member[*index] = false;
            }
            keep
        });
        self.history.push((guess_index, observed));
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.is_member.get(index).copied().unwrap_or(false)
    }

    /// Candidate indices that are still possible, ascending.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Each guess index reduced by so far, with the feedback it received.
    pub fn history(&self) -> &[(usize, FeedbackScore)] {
        &self.history
    }
}
