//! The code for a single worker thread, plus the budget which all workers share

use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        mpsc::Sender,
        Mutex, PoisonError,
    },
    time::{Duration, Instant},
};

use crate::{Error, Result, Solution};

use super::{backtrack, JobIdx, JobQueue, Search};

/// Number of steps a worker takes between checking the abort flag and time limit
const STEPS_BETWEEN_CHECKS: usize = 1024;

/// All the solutions found by one job
#[derive(Debug)]
pub(super) struct JobResult {
    pub idx: JobIdx,
    pub solutions: Vec<Solution>,
}

/// Data shared between all the workers.  This includes types with interior mutability (like
/// atomic integers), but the important thing is that the workers only need `&` references to it.
#[derive(Debug)]
pub(super) struct SharedData<'s> {
    pub search: &'s Search,
    /// Total number of steps taken by all the workers
    steps: AtomicUsize,
    deadline: Option<(Instant, Duration)>,
    abort_flag: &'s AtomicBool,
    /// Set once `failure` contains an error, so that the other workers can stop quickly
    has_failed: AtomicBool,
    failure: Mutex<Option<Error>>,
}

impl<'s> SharedData<'s> {
    pub fn new(search: &'s Search, abort_flag: &'s AtomicBool, start_time: Instant) -> Self {
        Self {
            search,
            steps: AtomicUsize::new(0),
            deadline: search
                .config
                .time_limit
                .map(|limit| (start_time + limit, limit)),
            abort_flag,
            has_failed: AtomicBool::new(false),
            failure: Mutex::new(None),
        }
    }

    pub fn steps(&self) -> usize {
        self.steps.load(Ordering::Relaxed)
    }

    /// Records that the search has failed.  Only the first failure is kept.
    fn fail(&self, error: Error) {
        let mut failure = self.failure.lock().unwrap_or_else(PoisonError::into_inner);
        if failure.is_none() {
            *failure = Some(error);
        }
        self.has_failed.store(true, Ordering::Relaxed);
    }

    fn failure(&self) -> Option<Error> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_failure(self) -> Option<Error> {
        self.failure
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pops jobs off the queue and explores them until either the queue is empty or the search fails
pub(super) fn run(shared: &SharedData, job_queue: &Mutex<JobQueue>, result_tx: Sender<JobResult>) {
    let mut budget = Budget::new(shared);
    loop {
        // The lock is released at the end of this statement, so other workers can take jobs
        // while this one is exploring
        let next_job = job_queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next();
        let Some((idx, job)) = next_job else {
            break; // Every job has been taken
        };

        let start = job.start().clone();
        match backtrack::explore_job(&shared.search.params.pattern, job, &mut budget) {
            Ok(solutions) => {
                log::debug!(
                    "Job {}: {} solutions starting from {}",
                    idx.index(),
                    solutions.len(),
                    start
                );
                if result_tx.send(JobResult { idx, solutions }).is_err() {
                    break; // Nothing is listening for results any more
                }
            }
            Err(error) => {
                shared.fail(error);
                break;
            }
        }
    }
}

/// A worker's view of the limits which apply to the whole search
#[derive(Debug)]
pub(super) struct Budget<'s> {
    shared: &'s SharedData<'s>,
    steps_since_check: usize,
}

impl<'s> Budget<'s> {
    fn new(shared: &'s SharedData<'s>) -> Self {
        Self {
            shared,
            steps_since_check: 0,
        }
    }

    /// Records that one row has been tied, returning an error if the search should stop
    pub fn step(&mut self) -> Result<()> {
        let total_steps = self.shared.steps.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(limit) = self.shared.search.config.step_limit {
            if total_steps > limit {
                return Err(Error::StepLimit(limit));
            }
        }

        self.steps_since_check += 1;
        if self.steps_since_check >= STEPS_BETWEEN_CHECKS {
            self.steps_since_check = 0;
            self.check()?;
        }
        Ok(())
    }

    /// Returns an error if the search has been aborted, run out of time, or failed in another
    /// worker
    pub fn check(&self) -> Result<()> {
        if self.shared.has_failed.load(Ordering::Relaxed) {
            return Err(self.shared.failure().unwrap_or(Error::Aborted));
        }
        if self.shared.abort_flag.load(Ordering::Relaxed) {
            return Err(Error::Aborted);
        }
        if let Some((deadline, limit)) = self.shared.deadline {
            if Instant::now() >= deadline {
                return Err(Error::TimeLimit(limit));
            }
        }
        Ok(())
    }
}
