use bulls_cows_solver::scorers::ExpectedSizeScorer;
use bulls_cows_solver::*;
use clap::{ArgEnum, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::error::Error;
use std::io;
use std::io::Write;
use std::time::Instant;

/// Plays Bulls and Cows (1A2B) in reverse: you pick a code of distinct digits, and the computer
/// guesses it.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// The number of digits in each code.
    #[clap(short = 'd', long, default_value_t = DEFAULT_NUM_DIGITS)]
    digits: u8,

    /// The number of worker threads to use. Defaults to one per CPU.
    #[clap(short = 't', long, env = "BULLS_COWS_THREADS")]
    threads: Option<usize>,

    /// How to choose each guess.
    #[clap(short = 's', long, arg_enum, default_value = "minimax")]
    strategy: Strategy,

    #[clap(subcommand)]
    command: Command,
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum Strategy {
    /// Minimize the largest number of codes that could remain.
    Minimax,
    /// Minimize the expected number of codes that remain.
    Expected,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an interactive game against the solver.
    Interactive,
    /// Run a single game with the given secret code.
    Single { secret: String },
    /// Play games against randomly chosen secrets and report how many guesses they took.
    Benchmark {
        /// The number of games to play.
        #[clap(short = 'n', long, default_value_t = 1000)]
        tries: u32,
        /// Seed for choosing secrets, for repeatable runs.
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Play a game against every possible secret.
    All,
}

const MAX_GUESSES: u32 = 16;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let start_time = Instant::now();
    let args = Args::parse();

    let precomputed = Precomputed::new(SolverConfig {
        num_digits: args.digits,
        num_threads: args.threads,
    })?;
    log::info!(
        "setup finished in {:.3}s",
        start_time.elapsed().as_secs_f64()
    );
    let scorer: Box<dyn GuessScorer> = match args.strategy {
        Strategy::Minimax => Box::new(MinimaxScorer),
        Strategy::Expected => Box::new(ExpectedSizeScorer),
    };

    match args.command {
        Command::Interactive => play_interactive_game(&precomputed, scorer)?,
        Command::Single { secret } => play_single_game(&secret, &precomputed, scorer)?,
        Command::Benchmark { tries, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let secrets: Vec<Code> = (0..tries)
                .map(|_| precomputed.space().random_code(&mut rng))
                .collect();
            run_benchmark(&secrets, &precomputed, scorer)?
        }
        Command::All => {
            let secrets = precomputed.space().codes().to_vec();
            run_benchmark(&secrets, &precomputed, scorer)?
        }
    }

    log::info!(
        "command executed in {:.3}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_benchmark(
    secrets: &[Code],
    precomputed: &Precomputed,
    scorer: Box<dyn GuessScorer>,
) -> Result<(), SolverError> {
    let mut num_guesses_per_game: Vec<u32> = Vec::with_capacity(secrets.len());
    for secret in secrets {
        match play_game(*secret, MAX_GUESSES, precomputed, scorer.clone())? {
            GameResult::Success { guesses } => num_guesses_per_game.push(guesses.len() as u32),
            result => {
                log::error!(
                    "failed to solve {}: {:?}",
                    precomputed.space().format_code(*secret),
                    result
                );
            }
        }
    }
    println!(
        "Solved {} of {} games. Results:",
        num_guesses_per_game.len(),
        secrets.len()
    );
    if num_guesses_per_game.is_empty() {
        return Ok(());
    }

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut num_rounds = num_games_per_round.keys().copied().collect::<Vec<u32>>();
    num_rounds.sort_unstable();
    for num_round in num_rounds.iter() {
        println!("|{}|{}|", num_round, num_games_per_round[num_round]);
    }

    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Guesses:** min {}, average {:.2} +/- {:.2}, max {}",
        num_rounds[0],
        average,
        std_dev,
        num_rounds[num_rounds.len() - 1]
    );
    Ok(())
}

fn play_single_game(
    secret: &str,
    precomputed: &Precomputed,
    scorer: Box<dyn GuessScorer>,
) -> Result<(), SolverError> {
    let space = precomputed.space();
    let secret = space.parse_code(secret)?;
    match play_game(secret, MAX_GUESSES, precomputed, scorer)? {
        GameResult::Success { guesses } => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            for guess in guesses.iter() {
                println!(
                    "\t{}\t{}",
                    space.format_code(*guess),
                    get_score_for_guess(secret, *guess, space.num_digits())?
                );
            }
        }
        GameResult::Failure { guesses } | GameResult::Contradiction { guesses } => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", space.format_code(*guess));
            }
        }
    }
    Ok(())
}

fn play_interactive_game(
    precomputed: &Precomputed,
    scorer: Box<dyn GuessScorer>,
) -> io::Result<()> {
    let space = precomputed.space();
    let num_digits = space.num_digits();
    let mut solver = Solver::new(precomputed, scorer);
    println!(
        "Choose a code of {} different digits. Press enter once you've chosen.",
        num_digits
    );

    {
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
    }

    println!(
        "I will now try to guess your code.\n\n\
         For each guess, enter two numbers separated by a space:\n\n\
           * A = how many digits are right and in the right place\n\
           * B = how many digits are right but in the wrong place\n\n\
         For example, if your code was \"1234\" and the guess was \"1243\", you would enter \"2 2\"."
    );

    loop {
        let guess = solver
            .propose_guess()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        println!(
            "I'm guessing: {} ({} codes possible). How did I do?",
            space.format_code(guess),
            solver.possible().len()
        );

        let state = loop {
            let score = match read_feedback(num_digits)? {
                Ok(score) => score,
                Err(err) => {
                    println!("{} Try again.", err);
                    continue;
                }
            };
            match solver.apply_feedback(score) {
                Ok(state) => break state,
                Err(err) => println!("{} Try again.", err),
            }
        };

        match state {
            SolverState::Solved { solution } if solution == guess => {
                println!("I did it! It took me {} guesses.", solver.rounds());
                return Ok(());
            }
            SolverState::Solved { solution } => {
                println!(
                    "Your code must be {}. That makes {} guesses.",
                    space.format_code(solution),
                    solver.rounds() + 1
                );
                return Ok(());
            }
            SolverState::Contradiction => {
                println!("No code matches all of those answers. Was one of them wrong?");
                return Ok(());
            }
            _ => {}
        }
    }
}

fn read_feedback(num_digits: u8) -> io::Result<Result<FeedbackScore, SolverError>> {
    print!("> ");
    io::stdout().flush()?;
    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the code was found",
        ));
    }
    Ok(parse_feedback(&buffer, num_digits))
}
