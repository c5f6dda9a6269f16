//! Code for running a [`Search`]: splitting it into jobs, running those jobs on a pool of worker
//! threads, and gathering their [`Solution`]s back together.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
        Mutex,
    },
    thread,
    time::{Duration, Instant},
};

use cordframe::{Arrangement, Parity, Pattern, StrandCount};
use itertools::Itertools;
use knotwork_utils::BigNumInt;

use crate::{
    candidates::Candidates,
    parameters::{Parameters, StartState},
    row_solver::{self, RowChoice},
    Error, Result, Solution, SolutionSet,
};

use self::worker::{JobResult, SharedData};

mod backtrack;
mod worker;

/// How often the update function is sent a [`Progress`] update
const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Find every braid which produces `pattern`, starting and finishing at `start`.  This runs with
/// the default [`Config`] (i.e. no limits, and one thread per CPU core).
///
/// ```
/// use braider::Score;
/// use cordframe::{Arrangement, Pattern};
///
/// let start = Arrangement::parse("R B G Y").unwrap();
/// let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
/// let solutions = braider::solve(start.clone(), pattern).unwrap();
/// assert_eq!(solutions.len(), 1);
/// let best = solutions.best().unwrap();
/// assert_eq!(best.end(), &start);
/// assert_eq!(best.score(), Score::new(2));
/// ```
pub fn solve(start: Arrangement, pattern: Pattern) -> Result<SolutionSet> {
    Search::new(Parameters::fixed(start, pattern), Config::default())?.run_to_completion()
}

/// Find every braid which produces `pattern`, trying every starting arrangement of a set of
/// colours inferred from `pattern` (see [`ColorPool::cyclic`](cordframe::ColorPool::cyclic)).
/// This runs with the default [`Config`].
pub fn solve_inferred(pattern: Pattern) -> Result<SolutionSet> {
    Search::new(Parameters::inferred(pattern), Config::default())?.run_to_completion()
}

/// General configuration parameters for a [`Search`].  These never change which [`Solution`]s
/// are found (or their order), only how the search is run and when it gives up.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// How many worker threads will be used.  If set to `None`, this will use the number of
    /// available CPU cores.
    pub num_threads: Option<usize>,
    /// Maximum number of rows which will be tied (across all threads) before the search fails
    /// with [`Error::StepLimit`]
    pub step_limit: Option<usize>,
    /// Maximum time the search can run for before failing with [`Error::TimeLimit`]
    pub time_limit: Option<Duration>,
    /// If the starting arrangement is being inferred, the maximum number of candidate
    /// arrangements which can be tried.  Any more and [`Search::new`] fails with
    /// [`Error::TooManyCandidates`].
    pub candidate_limit: Option<usize>,
}

/// A fully validated braiding problem, ready to be [`run`](Self::run).
#[derive(Debug)]
pub struct Search {
    params: Parameters,
    config: Config,
    strand_count: StrandCount,
    /// `Some` if and only if the starting arrangement is being inferred
    candidates: Option<Candidates>,
}

impl Search {
    /// Checks that `params` describe a problem which makes sense, returning the first structural
    /// [`Error`] found.
    pub fn new(params: Parameters, config: Config) -> Result<Self> {
        let (strand_count, candidates) = match &params.start {
            StartState::Fixed(start) => {
                let strand_count = start
                    .strand_count()
                    .map_err(|e| Error::from_start_len(start.len(), e))?;
                params.pattern.check_strand_count(strand_count)?;
                for (color, suggestion) in params.pattern.missing_colors(start) {
                    match suggestion {
                        Some(s) => log::warn!(
                            "Colour {} is in the pattern but not the start (did you mean {}?)",
                            color,
                            s
                        ),
                        None => log::warn!("Colour {} is in the pattern but not the start", color),
                    }
                }
                (strand_count, None)
            }
            StartState::Inferred { color_counts } => {
                let strand_count = params.pattern.infer_strand_count()?;
                log::info!("Inferred {} from the pattern", strand_count);
                let candidates = Candidates::new(
                    &params.pattern,
                    strand_count,
                    color_counts.as_deref(),
                    config.candidate_limit,
                )?;
                (strand_count, Some(candidates))
            }
        };

        Ok(Self {
            params,
            config,
            strand_count,
            candidates,
        })
    }

    /// Runs this `Search` to completion, blocking the current thread until every [`Solution`]
    /// has been found.  `update_fn` is called periodically with [`Update::Progress`], then once
    /// with [`Update::Complete`].  Setting `abort_flag` makes the search fail with
    /// [`Error::Aborted`].
    ///
    /// No partial results are returned: either the whole search space is explored, or this
    /// returns an [`Error`].
    pub fn run(
        &self,
        mut update_fn: impl FnMut(Update),
        abort_flag: &AtomicBool,
    ) -> Result<SolutionSet> {
        let start_time = Instant::now();
        let (jobs, num_jobs) = self.jobs();

        // Decide how many threads to use (defaulting to the number of CPU cores)
        let num_threads = self.config.num_threads.unwrap_or_else(num_cpus::get).max(1);
        log::debug!(
            "Running {} jobs on {} thread(s)",
            BigNumInt(num_jobs),
            num_threads
        );

        /* COMMUNICATION PRIMITIVES */

        let shared = SharedData::new(self, abort_flag, start_time);
        // Jobs are generated lazily, since there could be far too many candidate arrangements to
        // store at once
        let job_queue = Mutex::new(jobs);
        let (result_tx, result_rx) = mpsc::channel::<JobResult>();

        /* RUN WORKERS */

        // Solutions from each job, keyed by job index so that the output order doesn't depend on
        // which thread finished first
        let mut results = BTreeMap::<JobIdx, Vec<Solution>>::new();
        let mut progress = Progress {
            num_jobs,
            ..Progress::default()
        };
        thread::scope(|scope| {
            for thread_idx in 0..num_threads {
                let result_tx = result_tx.clone();
                let shared = &shared;
                let job_queue = &job_queue;
                thread::Builder::new()
                    .name(format!("Worker{}", thread_idx))
                    .spawn_scoped(scope, move || worker::run(shared, job_queue, result_tx))
                    .unwrap();
            }
            // Drop our sender, so that the channel closes once every worker has finished
            drop(result_tx);

            let mut last_update = Instant::now();
            loop {
                match result_rx.recv_timeout(PROGRESS_INTERVAL) {
                    Ok(JobResult { idx, solutions }) => {
                        progress.jobs_complete += 1;
                        progress.num_solutions += solutions.len();
                        if !solutions.is_empty() {
                            results.insert(idx, solutions);
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
                if last_update.elapsed() >= PROGRESS_INTERVAL {
                    progress.steps = shared.steps();
                    progress.aborting = abort_flag.load(Ordering::Relaxed);
                    update_fn(Update::Progress(progress));
                    last_update = Instant::now();
                }
            }
        });

        // Always send a final update before finishing
        progress.steps = shared.steps();
        progress.aborting = abort_flag.load(Ordering::Relaxed);
        update_fn(Update::Progress(progress));
        update_fn(Update::Complete);

        if let Some(error) = shared.into_failure() {
            log::debug!("Search failed after {:.2?}: {}", start_time.elapsed(), error);
            return Err(error);
        }
        let solutions = results.into_values().flatten().collect_vec();
        log::info!(
            "Found {} solutions in {:.2?} ({} steps)",
            solutions.len(),
            start_time.elapsed(),
            BigNumInt(progress.steps)
        );
        Ok(SolutionSet::new(solutions))
    }

    /// Runs this `Search` with no update function or abort flag
    pub fn run_to_completion(&self) -> Result<SolutionSet> {
        self.run(|_| {}, &AtomicBool::new(false))
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pattern(&self) -> &Pattern {
        &self.params.pattern
    }

    pub fn strand_count(&self) -> StrandCount {
        self.strand_count
    }

    /// Splits this `Search` into independent [`Job`]s, returning them (in order) along with how
    /// many there are
    fn jobs(&self) -> (JobQueue<'_>, usize) {
        match (&self.params.start, &self.candidates) {
            (StartState::Fixed(start), _) => {
                // One job per way of tying the first row.  There can be up to 4^k of these, so
                // they are generated lazily, like the candidate arrangements.
                let first_row = &self.params.pattern.rows()[0];
                let num_jobs = row_solver::num_choices(start, first_row, Parity::Odd);
                let queue: JobQueue = Box::new(
                    row_solver::solve_row(start, first_row, Parity::Odd)
                        .map(|choice| Job::FirstRow {
                            start: start.clone(),
                            choice,
                        })
                        .enumerate()
                        .map(|(idx, job)| (JobIdx::new(idx), job)),
                );
                (queue, num_jobs)
            }
            (StartState::Inferred { .. }, Some(candidates)) => {
                // One job per candidate starting arrangement
                let queue: JobQueue = Box::new(
                    candidates
                        .iter()
                        .map(Job::Candidate)
                        .enumerate()
                        .map(|(idx, job)| (JobIdx::new(idx), job)),
                );
                (queue, candidates.len())
            }
            (StartState::Inferred { .. }, None) => {
                unreachable!("`Search::new` always creates candidates when inferring the start")
            }
        }
    }
}

/// Update message from an in-progress [`Search`]
#[derive(Debug, Clone, Copy)]
pub enum Update {
    /// A report of how far the search has got
    Progress(Progress),
    /// The search has finished (successfully or not)
    Complete,
}

/// How much of a [`Search`] has been completed so far
#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    /// Number of rows tied so far
    pub steps: usize,
    /// Number of jobs which have been fully explored
    pub jobs_complete: usize,
    /// Total number of jobs in the search (saturating at `usize::MAX`)
    pub num_jobs: usize,
    /// Number of [`Solution`]s found so far
    pub num_solutions: usize,
    /// `true` if the abort flag has been set
    pub aborting: bool,
}

/* JOBS */

index_vec::define_index_type! {
    /// Index of a [`Job`], in the order that the jobs were generated
    struct JobIdx = usize;
}

/// Queue of jobs which haven't been started yet
type JobQueue<'s> = Box<dyn Iterator<Item = (JobIdx, Job)> + Send + 's>;

/// An independent sub-tree of the search, which can be explored by one worker thread
#[derive(Debug, Clone)]
enum Job {
    /// Find every braid from a fixed `start` which begins with the first row `choice`
    FirstRow { start: Arrangement, choice: RowChoice },
    /// Find every braid which starts and finishes at this arrangement
    Candidate(Arrangement),
}

impl Job {
    fn start(&self) -> &Arrangement {
        match self {
            Job::FirstRow { start, .. } => start,
            Job::Candidate(start) => start,
        }
    }
}
