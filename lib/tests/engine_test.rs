#[macro_use]
extern crate assert_matches;

use bulls_cows_solver::scorers::ExpectedSizeScorer;
use bulls_cows_solver::*;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::result::Result;
use std::sync::OnceLock;

fn three_digits() -> &'static Precomputed {
    static PRECOMPUTED: OnceLock<Precomputed> = OnceLock::new();
    PRECOMPUTED.get_or_init(|| {
        Precomputed::new(SolverConfig {
            num_digits: 3,
            num_threads: Some(2),
        })
        .expect("precomputation succeeds")
    })
}

fn four_digits() -> &'static Precomputed {
    static PRECOMPUTED: OnceLock<Precomputed> = OnceLock::new();
    PRECOMPUTED.get_or_init(|| {
        Precomputed::new(SolverConfig::default()).expect("precomputation succeeds")
    })
}

#[test]
fn new_solver_is_ready() {
    let solver = Solver::new(three_digits(), MinimaxScorer);

    assert_eq!(solver.state(), SolverState::Ready);
    assert_eq!(solver.possible().len(), 720);
    assert_eq!(solver.rounds(), 0);
}

#[test]
fn propose_guess_awaits_feedback() -> Result<(), SolverError> {
    let mut solver = Solver::new(three_digits(), MinimaxScorer);

    let guess = solver.propose_guess()?;

    assert_eq!(guess, 12);
    assert_eq!(solver.state(), SolverState::AwaitingFeedback { guess: 12 });
    assert_matches!(
        solver.propose_guess(),
        Err(SolverError::UnexpectedState(_))
    );
    Ok(())
}

#[test]
fn apply_feedback_requires_a_guess() {
    let mut solver = Solver::new(three_digits(), MinimaxScorer);

    assert_matches!(
        solver.apply_feedback(FeedbackScore { bulls: 0, cows: 0 }),
        Err(SolverError::UnexpectedState(_))
    );
    assert_eq!(solver.state(), SolverState::Ready);
}

#[test]
fn apply_feedback_narrows_possible_codes() -> Result<(), SolverError> {
    let mut solver = Solver::new(three_digits(), MinimaxScorer);
    solver.propose_guess()?;

    let state = solver.apply_feedback(FeedbackScore { bulls: 0, cows: 0 })?;

    assert_eq!(state, SolverState::Ready);
    assert_eq!(solver.possible().len(), 210);
    assert_eq!(solver.rounds(), 1);
    assert!(solver
        .possible_codes()
        .iter()
        .all(|code| digits_of(*code, 3).as_slice().iter().all(|digit| *digit >= 3)));
    Ok(())
}

#[test]
fn apply_feedback_rejects_invalid_scores() -> Result<(), SolverError> {
    let mut solver = Solver::new(three_digits(), MinimaxScorer);
    let guess = solver.propose_guess()?;

    assert_eq!(
        solver.apply_feedback(FeedbackScore { bulls: 3, cows: 1 }),
        Err(SolverError::InvalidFeedback {
            bulls: 3,
            cows: 1,
            num_digits: 3
        })
    );
    assert_eq!(solver.state(), SolverState::AwaitingFeedback { guess });
    assert_eq!(solver.possible().len(), 720);

    // The same guess can still be answered.
    assert_eq!(
        solver.apply_feedback(FeedbackScore { bulls: 0, cows: 0 })?,
        SolverState::Ready
    );
    Ok(())
}

#[test]
fn correct_guess_solves() -> Result<(), SolverError> {
    let mut solver = Solver::new(three_digits(), MinimaxScorer);
    let guess = solver.propose_guess()?;

    let state = solver.apply_feedback(FeedbackScore::solved(3))?;

    assert_eq!(state, SolverState::Solved { solution: guess });
    assert_eq!(solver.possible_codes(), vec![guess]);
    assert_matches!(
        solver.propose_guess(),
        Err(SolverError::UnexpectedState(_))
    );
    Ok(())
}

#[test]
fn inconsistent_feedback_is_a_contradiction() -> Result<(), SolverError> {
    let mut solver = Solver::new(three_digits(), MinimaxScorer);
    solver.propose_guess()?;

    let state = solver.apply_feedback(FeedbackScore { bulls: 2, cows: 1 })?;

    assert_eq!(state, SolverState::Contradiction);
    assert!(solver.possible().is_empty());
    assert!(solver.top_guesses(5).is_empty());
    assert_matches!(
        solver.propose_guess(),
        Err(SolverError::UnexpectedState(_))
    );
    assert_matches!(
        solver.apply_feedback(FeedbackScore { bulls: 0, cows: 0 }),
        Err(SolverError::UnexpectedState(_))
    );
    Ok(())
}

#[test]
fn contradiction_after_several_rounds() -> Result<(), SolverError> {
    let precomputed = three_digits();
    let mut solver = Solver::new(precomputed, MinimaxScorer);

    // Honest answers for 987, until the last one.
    let mut state = SolverState::Ready;
    while state == SolverState::Ready && solver.rounds() < 2 {
        let guess = solver.propose_guess()?;
        state = solver.apply_feedback(get_score_for_guess(987, guess, 3)?)?;
    }
    assert_eq!(state, SolverState::Ready);
    let guess = solver.propose_guess()?;
    let honest = get_score_for_guess(987, guess, 3)?;
    let lie = if honest.bulls == 0 {
        FeedbackScore::solved(3)
    } else {
        FeedbackScore { bulls: 0, cows: 0 }
    };
    let remaining = solver.possible_codes();
    let consistent_with_lie = remaining
        .iter()
        .any(|code| get_score_for_guess(*code, guess, 3) == Ok(lie));

    let state = solver.apply_feedback(lie)?;

    if consistent_with_lie {
        assert_ne!(state, SolverState::Contradiction);
    } else {
        assert_eq!(state, SolverState::Contradiction);
    }
    Ok(())
}

#[test]
fn reset_starts_a_new_game() -> Result<(), SolverError> {
    let mut solver = Solver::new(three_digits(), MinimaxScorer);
    solver.propose_guess()?;
    solver.apply_feedback(FeedbackScore { bulls: 2, cows: 1 })?;

    solver.reset();

    assert_eq!(solver.state(), SolverState::Ready);
    assert_eq!(solver.possible().len(), 720);
    assert_eq!(solver.rounds(), 0);
    assert_eq!(solver.propose_guess()?, 12);
    Ok(())
}

#[test]
fn top_guesses_are_ranked() -> Result<(), SolverError> {
    let mut solver = Solver::new(three_digits(), MinimaxScorer);

    let top = solver.top_guesses(3);
    let guess = solver.propose_guess()?;

    assert_eq!(top.len(), 3);
    assert_eq!(top[0].code, guess);
    assert!(top.windows(2).all(|pair| pair[0].score <= pair[1].score));
    Ok(())
}

#[test]
fn play_game_solves_every_three_digit_code() -> Result<(), SolverError> {
    let precomputed = three_digits();

    for secret in precomputed.space().codes() {
        let result = play_game(*secret, 10, precomputed, MinimaxScorer)?;

        assert_matches!(result, GameResult::Success { .. });
        assert_eq!(result.guesses().last(), Some(secret));
        assert!(result.guesses().len() <= 6, "{:?}", result);
    }
    Ok(())
}

#[test]
fn play_game_with_expected_size_scorer() -> Result<(), SolverError> {
    let precomputed = three_digits();

    for secret in precomputed.space().codes().iter().step_by(7) {
        let result = play_game(*secret, 10, precomputed, ExpectedSizeScorer)?;

        assert_matches!(result, GameResult::Success { .. });
        assert_eq!(result.guesses().last(), Some(secret));
    }
    Ok(())
}

#[test]
fn play_game_converges_for_four_digits() -> Result<(), SolverError> {
    let precomputed = four_digits();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..6 {
        let secret = precomputed.space().random_code(&mut rng);
        let mut solver = Solver::new(precomputed, MinimaxScorer);
        let mut state = SolverState::Ready;
        while state == SolverState::Ready {
            let guess = solver.propose_guess()?;
            let before = solver.possible().len();
            state = solver.apply_feedback(get_score_for_guess(secret, guess, 4)?)?;
            assert!(solver.possible().len() <= before);
            assert!(solver.possible_codes().contains(&secret));
        }

        assert_eq!(state, SolverState::Solved { solution: secret });
        assert!(solver.rounds() <= 7, "{} took {} rounds", secret, solver.rounds());
    }
    Ok(())
}

#[test]
fn play_game_runs_out_of_guesses() -> Result<(), SolverError> {
    let result = play_game(987, 1, three_digits(), MinimaxScorer)?;

    assert_eq!(result, GameResult::Failure { guesses: vec![12] });
    Ok(())
}

#[test]
fn play_game_first_guess_wins() -> Result<(), SolverError> {
    let result = play_game(12, 1, three_digits(), MinimaxScorer)?;

    assert_eq!(result, GameResult::Success { guesses: vec![12] });
    Ok(())
}

#[test]
fn play_game_unknown_secret() {
    assert_matches!(
        play_game(112, 10, three_digits(), MinimaxScorer),
        Err(SolverError::InvalidCode(_))
    );
    assert_matches!(
        play_game(1234, 10, three_digits(), MinimaxScorer),
        Err(SolverError::InvalidCode(_))
    );
}
