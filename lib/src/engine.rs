use crate::config::Precomputed;
use crate::data::Code;
use crate::restrictions::PossibleSet;
use crate::results::*;
use crate::scorers::rank_guesses;
use crate::scorers::select_guess;
use crate::scorers::GuessScorer;
use crate::scorers::RankedGuess;
use std::result::Result;

/// Where a [`Solver`] is in the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// The solver is ready to propose its next guess.
    Ready,
    /// A guess was proposed and the solver is waiting for its feedback.
    AwaitingFeedback { guess: Code },
    /// Only one code is consistent with the feedback. The game is over.
    Solved { solution: Code },
    /// No code is consistent with the feedback, so some feedback must have been wrong. The game is
    /// over.
    Contradiction,
}

/// Plays one game at a time: proposes guesses, and narrows down the possible codes from the
/// feedback to each guess.
///
/// ```
/// use bulls_cows_solver::*;
///
/// let precomputed = Precomputed::new(SolverConfig { num_digits: 2, num_threads: None })?;
/// let mut solver = Solver::new(&precomputed, MinimaxScorer);
///
/// let guess = solver.propose_guess()?;
/// let score = get_score_for_guess(37, guess, 2)?;
/// assert_ne!(solver.apply_feedback(score)?, SolverState::Contradiction);
/// # Ok::<(), SolverError>(())
/// ```
pub struct Solver<'a, S: GuessScorer> {
    precomputed: &'a Precomputed,
    scorer: S,
    possible: PossibleSet,
    state: SolverState,
}

impl<'a, S: GuessScorer> Solver<'a, S> {
    /// Starts a new game using the given precomputed data.
    pub fn new(precomputed: &'a Precomputed, scorer: S) -> Solver<'a, S> {
        Solver {
            precomputed,
            scorer,
            possible: PossibleSet::new(precomputed.space().len()),
            state: SolverState::Ready,
        }
    }

    /// Abandons the current game and starts a new one.
    pub fn reset(&mut self) {
        self.possible.reset();
        self.state = SolverState::Ready;
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// The candidates that are still consistent with all feedback.
    pub fn possible(&self) -> &PossibleSet {
        &self.possible
    }

    /// The codes that are still consistent with all feedback, ascending.
    pub fn possible_codes(&self) -> Vec<Code> {
        let space = self.precomputed.space();
        self.possible
            .members()
            .iter()
            .map(|index| space.code_at(*index))
            .collect()
    }

    /// The number of guesses that have received feedback in this game.
    pub fn rounds(&self) -> usize {
        self.possible.history().len()
    }

    /// Returns up to `n` of the best next guesses, best first. This is empty once no code is
    /// possible.
    pub fn top_guesses(&self, n: usize) -> Vec<RankedGuess> {
        if self.possible.is_empty() {
            return Vec::new();
        }
        let mut ranking = rank_guesses(
            &self.possible,
            self.precomputed.matrix(),
            self.precomputed.space(),
            self.precomputed.pool(),
            &self.scorer,
        );
        ranking.truncate(n);
        ranking
    }

    /// Chooses the next guess. The solver then waits for [`Solver::apply_feedback`].
    pub fn propose_guess(&mut self) -> Result<Code, SolverError> {
        if self.state != SolverState::Ready {
            return Err(SolverError::UnexpectedState("propose a guess"));
        }
        let best = select_guess(
            &self.possible,
            self.precomputed.matrix(),
            self.precomputed.space(),
            self.precomputed.pool(),
            &self.scorer,
        );
        log::debug!(
            "guessing {} (worst score {}, {} possible)",
            self.precomputed.space().format_code(best.code),
            best.score,
            self.possible.len()
        );
        self.state = SolverState::AwaitingFeedback { guess: best.code };
        Ok(best.code)
    }

    /// Narrows down the possible codes using the feedback to the last proposed guess.
    ///
    /// Feedback that no code could produce is rejected, and the solver keeps waiting for feedback
    /// to the same guess.
    pub fn apply_feedback(&mut self, score: FeedbackScore) -> Result<SolverState, SolverError> {
        let guess = match self.state {
            SolverState::AwaitingFeedback { guess } => guess,
            _ => return Err(SolverError::UnexpectedState("apply feedback")),
        };
        let precomputed = self.precomputed;
        let space = precomputed.space();
        let score = FeedbackScore::new(score.bulls, score.cows, space.num_digits())?;
        let guess_index = space
            .index_of(guess)
            .expect("proposed guesses are valid candidates");
        self.possible
            .reduce(precomputed.matrix(), guess_index, score);
        log::debug!(
            "{} scored {}, {} codes remain",
            space.format_code(guess),
            score,
            self.possible.len()
        );
        self.state = match self.possible.members() {
            [] => {
                log::warn!(
                    "no code is consistent with the feedback after {} rounds",
                    self.rounds()
                );
                SolverState::Contradiction
            }
            [only] => SolverState::Solved {
                solution: space.code_at(*only),
            },
            _ => SolverState::Ready,
        };
        Ok(self.state)
    }
}

/// Simulates a game against `secret`, computing the feedback for each guess honestly.
///
/// At most `max_guesses` guesses are played, including the final winning guess.
pub fn play_game<S: GuessScorer>(
    secret: Code,
    max_guesses: u32,
    precomputed: &Precomputed,
    scorer: S,
) -> Result<GameResult, SolverError> {
    let space = precomputed.space();
    if !space.contains(secret) {
        return Err(SolverError::InvalidCode(secret.to_string()));
    }
    let mut solver = Solver::new(precomputed, scorer);
    let mut guesses: Vec<Code> = Vec::new();
    while guesses.len() < max_guesses as usize {
        let guess = solver.propose_guess()?;
        guesses.push(guess);
        let score = get_score_for_guess(secret, guess, space.num_digits())?;
        match solver.apply_feedback(score)? {
            SolverState::Solved { solution } => {
                if solution == guess {
                    return Ok(GameResult::Success { guesses });
                }
                if guesses.len() == max_guesses as usize {
                    break;
                }
                guesses.push(solution);
                return Ok(GameResult::Success { guesses });
            }
            SolverState::Contradiction => return Ok(GameResult::Contradiction { guesses }),
            _ => {}
        }
    }
    Ok(GameResult::Failure { guesses })
}
