//! Crate for loading and running Braider's request files.  The CLI itself is a very thin wrapper
//! around this crate, parsing CLI args and immediately calling into it.  This crate is also shared
//! with the integration test runner, making sure that the integration tests run in exactly the
//! same way as Braider itself.

#![deny(clippy::all)]

pub mod args;
pub mod logging;
mod request;
pub mod response;
mod utils;

use std::{
    path::Path,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use braider::{Parameters, Search, SolutionSet};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use crate::{
    args::Options,
    logging::{SingleLineProgressLogger, SolutionPrinter},
    response::{Response, Status},
};

pub use request::Request;

/// How many of the most concise braids are printed if the user doesn't say
const DEFAULT_NUM_SOLUTIONS: usize = 5;

pub fn init_logging(log_level: LevelFilter) {
    SimpleLogger::new()
        .without_timestamps()
        .with_colors(true)
        .with_level(log_level)
        .init()
        .unwrap();
}

/// Load a request from `input_file` and run it.  Returns `Ok(None)` if a [`DebugOption`] stopped
/// the run before the search, and `Err` if the request couldn't be read.  Errors from the search
/// itself (including invalid patterns) are returned inside the [`QueryResult`].
pub fn run(
    input_file: &Path,
    options: &Options,
    ctrl_c_behaviour: CtrlCBehaviour,
) -> anyhow::Result<Option<QueryResult>> {
    let start_time = Instant::now();

    /// If the user specifies a [`DebugOption`] flag with e.g. `-D request`, then debug print the
    /// corresponding value and exit.
    macro_rules! debug_print {
        ($variant: ident, $val: expr) => {
            if options.debug_option == Some(DebugOption::$variant) {
                dbg!($val);
                return Ok(None);
            }
        };
    }

    // Read the request and convert it into the parameters of a search
    let request = Request::read_from_file(input_file)?;
    debug_print!(Request, request);
    let params = request.parameters()?;
    let config = request.config(options)?;
    debug_print!(Params, params);

    let search = match Search::new(params.clone(), config) {
        Ok(search) => search,
        Err(error) => {
            return Ok(Some(QueryResult {
                params,
                outcome: Err(error),
                duration: start_time.elapsed(),
            }))
        }
    };
    if options.debug_option == Some(DebugOption::StopBeforeSearch) {
        return Ok(None);
    }

    // Run the search, aborting if the user presses Ctrl-C
    let abort_flag = Arc::new(AtomicBool::new(false));
    if ctrl_c_behaviour == CtrlCBehaviour::RecoverAbort {
        let abort_flag = abort_flag.clone();
        if let Err(e) = ctrlc::set_handler(move || abort_flag.store(true, Ordering::SeqCst)) {
            log::warn!("Can't set Ctrl-C handler: {}", e);
        }
    }
    let mut update_logger = SingleLineProgressLogger::new();
    let outcome = search.run(|update| update_logger.log(update), &abort_flag);

    Ok(Some(QueryResult {
        params,
        outcome,
        duration: start_time.elapsed(),
    }))
}

/// The outcome of running a request
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub params: Parameters,
    /// An empty [`SolutionSet`] means that the search completed but no braid produces the pattern
    pub outcome: braider::Result<SolutionSet>,
    pub duration: Duration,
}

impl QueryResult {
    pub fn status(&self) -> Status {
        match &self.outcome {
            Ok(solutions) if solutions.is_empty() => Status::NotFound,
            Ok(_) => Status::Ok,
            Err(e) if e.is_structural() => Status::BadRequest,
            Err(_) => Status::Limit,
        }
    }

    pub fn response(&self) -> Response {
        Response::new(self)
    }

    /// Print the result for a human to read, with the most concise braids as tables
    pub fn print(&self, options: &Options) {
        let solutions = match &self.outcome {
            Ok(solutions) => solutions,
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        };
        if solutions.is_empty() {
            println!("No braid produces this pattern ({:.2?})", self.duration);
            return;
        }

        let num_to_print = options.num_solutions.unwrap_or(DEFAULT_NUM_SOLUTIONS);
        let printer = SolutionPrinter::new(
            &self.params.pattern,
            options.notation.unwrap_or_default(),
            true,
        );
        for (rank, solution) in solutions.most_concise(num_to_print).into_iter().enumerate() {
            println!("{}", printer.solution_string(rank, solution));
        }
        println!(
            "Found {} braids in {:.2?}.  Printed the {} most concise.",
            solutions.len(),
            self.duration,
            num_to_print.min(solutions.len())
        );
    }
}

/// What should happen when the user presses Ctrl-C
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlCBehaviour {
    /// Abort the search, and report that it was stopped early
    RecoverAbort,
    /// Don't set a handler, leaving the default behaviour of killing the process.  A handler can
    /// only be set once, so this must be used when running several requests in the same process.
    TerminateProcess,
}

/// What item should be debug printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugOption {
    Request,
    Params,
    /// Stop just before the search starts, to check that the request is valid without running it
    StopBeforeSearch,
}

impl FromStr for DebugOption {
    type Err = String;

    fn from_str(v: &str) -> Result<Self, String> {
        Ok(match v.to_lowercase().as_str() {
            "request" => Self::Request,
            "params" => Self::Params,
            "no-search" | "stop-before-search" => Self::StopBeforeSearch,
            _ => {
                return Err(format!(
                    "Unknown value {:?}. Expected `request`, `params` or `no-search`.",
                    v
                ))
            }
        })
    }
}
