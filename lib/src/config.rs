use crate::data::CandidateSpace;
use crate::data::DEFAULT_NUM_DIGITS;
use crate::matrix::FeedbackMatrix;
use crate::results::SolverError;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use std::result::Result;

/// Fixed settings for a solver, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// The number of digits in each code.
    pub num_digits: u8,
    /// The number of worker threads for precomputation and ranking. `None` lets rayon decide.
    pub num_threads: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            num_digits: DEFAULT_NUM_DIGITS,
            num_threads: None,
        }
    }
}

impl SolverConfig {
    /// Builds a dedicated worker pool for this configuration.
    pub fn build_thread_pool(&self) -> Result<ThreadPool, SolverError> {
        let mut builder =
            ThreadPoolBuilder::new().thread_name(|index| format!("bulls-cows-{}", index));
        if let Some(num_threads) = self.num_threads {
            builder = builder.num_threads(num_threads);
        }
        builder
            .build()
            .map_err(|err| SolverError::ThreadPool(err.to_string()))
    }
}

/// The immutable data shared by every game: the candidates, the feedback between them, and the
/// pool used to rank guesses.
///
/// Building this is the expensive step. Construct it once and hand out references to each
/// [`Solver`](crate::Solver).
#[derive(Debug)]
pub struct Precomputed {
    space: CandidateSpace,
    matrix: FeedbackMatrix,
    pool: ThreadPool,
}

impl Precomputed {
    /// Enumerates the candidates and precomputes their feedback matrix.
    ///
    /// ```
    /// use bulls_cows_solver::Precomputed;
    /// use bulls_cows_solver::SolverConfig;
    ///
    /// let precomputed = Precomputed::new(SolverConfig {
    ///     num_digits: 2,
    ///     num_threads: Some(2),
    /// })
    /// .unwrap();
    /// assert_eq!(precomputed.space().len(), 90);
    /// ```
    pub fn new(config: SolverConfig) -> Result<Precomputed, SolverError> {
        let pool = config.build_thread_pool()?;
        let space = pool.install(|| CandidateSpace::new(config.num_digits))?;
        log::info!(
            "{} of {} codes with {} digits are valid candidates (using {} threads)",
            space.len(),
            10u32.pow(config.num_digits as u32),
            config.num_digits,
            pool.current_num_threads()
        );
        let matrix = FeedbackMatrix::precompute(&space, &pool);
        Ok(Precomputed {
            space,
            matrix,
            pool,
        })
    }

    pub fn space(&self) -> &CandidateSpace {
        &self.space
    }

    pub fn matrix(&self) -> &FeedbackMatrix {
        &self.matrix
    }

    pub fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    pub fn num_digits(&self) -> u8 {
        self.space.num_digits()
    }
}
