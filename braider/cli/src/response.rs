//! The machine-readable output of a run of Braider, printed with `--json`

use braider::{SolutionSet, StartState};
use cordframe::{Arrangement, MethodRow, Pattern};
use serde::Serialize;

use crate::QueryResult;

/// The overall outcome of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// At least one braid was found
    Ok,
    /// The search completed, but no braid produces the pattern
    NotFound,
    /// The request doesn't describe a valid problem
    BadRequest,
    /// The search was stopped by a limit (or by the user) before it completed
    Limit,
}

impl Status {
    /// The exit code of the process which produced this `Status`
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::NotFound => 1,
            Status::BadRequest => 2,
            Status::Limit => 3,
        }
    }
}

/// The result of a request, in the form that's sent back to the caller.  Everything except
/// `status` is `null` if it isn't known.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: Status,
    /// The start of the best braid (or the fixed start, if no braid was found)
    pub start_state: Option<Arrangement>,
    pub target_pattern: Option<Pattern>,
    /// The knots of the best braid
    pub best_solution: Option<Vec<MethodRow>>,
    /// The arrangement of the strands before each row of the best braid, and after the last one
    pub states_path: Option<Vec<Arrangement>>,
    pub total_solutions: Option<usize>,
    pub score: Option<u32>,
    pub error: Option<String>,
}

impl Response {
    pub fn new(result: &QueryResult) -> Self {
        let fixed_start = match &result.params.start {
            StartState::Fixed(start) => Some(start.clone()),
            StartState::Inferred { .. } => None,
        };
        let mut response = Self {
            status: result.status(),
            start_state: fixed_start,
            target_pattern: Some(result.params.pattern.clone()),
            best_solution: None,
            states_path: None,
            total_solutions: None,
            score: None,
            error: None,
        };
        match &result.outcome {
            Ok(solutions) => response.add_solutions(solutions),
            Err(e) => response.error = Some(e.to_string()),
        }
        response
    }

    /// A `Response` to a request which couldn't be read
    pub fn bad_request(error: &anyhow::Error) -> Self {
        Self {
            status: Status::BadRequest,
            start_state: None,
            target_pattern: None,
            best_solution: None,
            states_path: None,
            total_solutions: None,
            score: None,
            error: Some(format!("{:#}", error)),
        }
    }

    fn add_solutions(&mut self, solutions: &SolutionSet) {
        self.total_solutions = Some(solutions.len());
        match solutions.best() {
            Some(best) => {
                self.start_state = Some(best.start().clone());
                self.best_solution = Some(best.method_rows().to_vec());
                self.states_path = Some(best.states().to_vec());
                self.score = Some(best.score().value());
            }
            None => self.error = Some("No braid produces this pattern".to_owned()),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
