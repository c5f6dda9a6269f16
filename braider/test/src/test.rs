//! Runner for Braider's integration test cases.  Every request file in `test/cases/` is run
//! through `braider_cli` (exactly as the CLI would run it) and the outcome is compared against
//! `test/expected.toml`.  The request files in `demos/` are only checked to be valid.

use std::{
    collections::BTreeMap,
    fmt::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context;
use braider_cli::{args::Options, response::Status, CtrlCBehaviour, DebugOption, QueryResult};
use colored::{Color, ColoredString, Colorize};
use cordframe::Arrangement;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Deserialize;
use walkdir::WalkDir;

// NOTE: All paths are relative to the `braider` directory.  Cargo runs custom test code in the
// same directory as the `Cargo.toml` for that crate (in our case `braider/cli/Cargo.toml`), so
// these will all be prefixed with `PATH_TO_BRAIDER_DIR`.
const EXPECTED_RESULTS_PATH: &str = "test/expected.toml";
const TEST_DIRS: [(&str, DirType); 2] = [("test/cases/", DirType::Test), ("demos/", DirType::Demo)];
const PATH_TO_BRAIDER_DIR: &str = "../";

/// Number of threads used by each search.  The cases themselves are already run in parallel.
const THREADS_PER_CASE: usize = 2;

///////////////////
// MAIN FUNCTION //
///////////////////

fn main() -> anyhow::Result<()> {
    let start = Instant::now();

    // Collect the test cases
    let cases = collect_cases()?;
    // Run the tests
    println!("running {} tests", cases.len());
    let completed_tests: Vec<RunTestCase> = cases.into_par_iter().map(run_test).collect();
    // Report the failures, then a summary
    report_failures(&completed_tests);
    match print_summary_string(&completed_tests, start.elapsed()) {
        Outcome::Pass => Ok(()),
        Outcome::Fail => Err(anyhow::Error::msg("Tests failed")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
enum Outcome {
    /// All tests passed
    Pass,
    /// Some tests failed
    Fail,
}

impl Outcome {
    fn colored_string(self) -> ColoredString {
        match self {
            Self::Pass => ok_string(),
            Self::Fail => fail_string(),
        }
    }
}

////////////////////////
// LOADING TEST CASES //
////////////////////////

/// The contents of `expected.toml`, mapping the path of each case (relative to the `braider`
/// directory) to what it should produce.
type ExpectedFile = BTreeMap<String, Expectation>;

/// What a test case is expected to produce
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct Expectation {
    outcome: ExpectedOutcome,
    /// The exact number of braids found
    num_solutions: Option<usize>,
    best_score: Option<u32>,
    /// The start of the most concise braid
    best_start: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ExpectedOutcome {
    Solutions,
    NoSolution,
    BadRequest,
    Limit,
}

impl ExpectedOutcome {
    fn status(self) -> Status {
        match self {
            Self::Solutions => Status::Ok,
            Self::NoSolution => Status::NotFound,
            Self::BadRequest => Status::BadRequest,
            Self::Limit => Status::Limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirType {
    /// Test cases, which are run and compared against their expected results
    Test,
    /// Demo requests, which are only checked to be valid
    Demo,
}

fn collect_cases() -> anyhow::Result<Vec<UnrunTestCase>> {
    let mut expected = load_expected()?;

    let mut cases = Vec::new();
    for (dir, dir_type) in TEST_DIRS {
        let full_dir = Path::new(PATH_TO_BRAIDER_DIR).join(dir);
        for entry in WalkDir::new(&full_dir) {
            let entry = entry.with_context(|| format!("Error walking {:?}", full_dir))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue; // Only request files are test cases
            }
            let name = path
                .strip_prefix(PATH_TO_BRAIDER_DIR)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");
            cases.push(UnrunTestCase {
                expected: expected.remove(&name),
                name,
                path: path.to_owned(),
                dir_type,
            });
        }
    }
    // Any remaining expectations don't have a case, which is probably a typo
    for name in expected.keys() {
        println!("{}: no test case found for {}", "warning".yellow().bold(), name);
    }
    cases.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(cases)
}

fn load_expected() -> anyhow::Result<ExpectedFile> {
    let full_path = Path::new(PATH_TO_BRAIDER_DIR).join(EXPECTED_RESULTS_PATH);
    let toml = std::fs::read_to_string(&full_path)
        .with_context(|| format!("Error loading results file ({:?})", full_path))?;
    toml::from_str(&toml).with_context(|| format!("Error parsing results file ({:?})", full_path))
}

////////////////////////
// RUNNING TEST CASES //
////////////////////////

/// Run a test case, determining its [`CaseOutcome`].  Prints a status line once finished.
fn run_test(case: UnrunTestCase) -> RunTestCase {
    let options = Options {
        num_threads: Some(THREADS_PER_CASE),
        debug_option: match case.dir_type {
            DirType::Test => None,
            DirType::Demo => Some(DebugOption::StopBeforeSearch),
        },
        ..Options::default()
    };
    let result = braider_cli::run(&case.path, &options, CtrlCBehaviour::TerminateProcess);

    let (outcome, report) = match case.dir_type {
        DirType::Demo => match result {
            Ok(None) => (CaseOutcome::Parsed, None),
            Ok(Some(r)) => (CaseOutcome::Fail, Some(summarise(&r))),
            Err(e) => (CaseOutcome::Fail, Some(format!("{:#}", e))),
        },
        DirType::Test => {
            let actual = match result {
                Ok(Some(r)) => ActualOutcome::Result(r),
                Ok(None) => ActualOutcome::BadRequest("stopped before the search".to_owned()),
                Err(e) => ActualOutcome::BadRequest(format!("{:#}", e)),
            };
            match &case.expected {
                None => (CaseOutcome::Unspecified, Some(actual.summary())),
                Some(expected) => match check(expected, &actual) {
                    Ok(()) => (CaseOutcome::Ok, None),
                    Err(message) => (
                        CaseOutcome::Fail,
                        Some(format!("{}\n  actual: {}", message, actual.summary())),
                    ),
                },
            }
        }
    };

    println!("{} ... {}", case.name, outcome.colored_string());
    RunTestCase {
        base: case,
        outcome,
        report,
    }
}

/// What actually happened when a test case was run
enum ActualOutcome {
    /// The request was read successfully, and (possibly) a search was run
    Result(QueryResult),
    /// The request file couldn't be read
    BadRequest(String),
}

impl ActualOutcome {
    fn status(&self) -> Status {
        match self {
            Self::Result(r) => r.status(),
            Self::BadRequest(_) => Status::BadRequest,
        }
    }

    fn summary(&self) -> String {
        match self {
            Self::Result(r) => summarise(r),
            Self::BadRequest(e) => format!("bad request: {}", e),
        }
    }
}

/// Compares an actual outcome against what was expected, returning a message describing the first
/// difference
fn check(expected: &Expectation, actual: &ActualOutcome) -> Result<(), String> {
    if actual.status() != expected.outcome.status() {
        return Err(format!(
            "expected {:?}, got {:?}",
            expected.outcome.status(),
            actual.status()
        ));
    }
    let ActualOutcome::Result(QueryResult {
        params,
        outcome: Ok(solutions),
        ..
    }) = actual
    else {
        return Ok(()); // Nothing more to check for errors
    };

    // Every braid must produce the pattern and close up, however it was found
    for solution in solutions {
        solution
            .check(&params.pattern)
            .map_err(|fault| format!("invalid braid {}: {}", solution, fault))?;
    }

    if let Some(num) = expected.num_solutions {
        if solutions.len() != num {
            return Err(format!("expected {} braids, found {}", num, solutions.len()));
        }
    }
    let best = solutions.best();
    if let Some(score) = expected.best_score {
        let actual_score = best.map(|s| s.score().value());
        if actual_score != Some(score) {
            return Err(format!(
                "expected best score {}, got {:?}",
                score, actual_score
            ));
        }
    }
    if let Some(start) = &expected.best_start {
        let start = Arrangement::parse(start)
            .map_err(|e| format!("can't parse expected start {:?}: {}", start, e))?;
        if best.map(|s| s.start()) != Some(&start) {
            return Err(format!(
                "expected best braid to start from {}, got {:?}",
                start,
                best.map(|s| s.start().to_string())
            ));
        }
    }
    Ok(())
}

/// One-line summary of a [`QueryResult`], in roughly the format of `expected.toml`
fn summarise(result: &QueryResult) -> String {
    let mut s = format!("status = {:?}", result.status());
    match &result.outcome {
        Ok(solutions) => {
            write!(s, ", num_solutions = {}", solutions.len()).unwrap();
            if let Some(best) = solutions.best() {
                write!(
                    s,
                    ", best_score = {}, best_start = \"{}\"",
                    best.score(),
                    best.start()
                )
                .unwrap();
            }
        }
        Err(e) => write!(s, ", error = {:?}", e.to_string()).unwrap(),
    }
    s
}

////////////////////////////
// PRINT ERRORS & SUMMARY //
////////////////////////////

/// Given the completed tests, print reports for the unspecified and failed tests
fn report_failures(run_cases: &[RunTestCase]) {
    // Report all unspecified tests first
    for case in run_cases {
        if case.outcome == CaseOutcome::Unspecified {
            println!();
            println!(
                "Unspecified results for {}.  This is the output:",
                unspecified_str(&case.name)
            );
            println!("  {}", case.report.as_deref().unwrap_or(""));
        }
    }
    // Report all the failures second
    for case in run_cases {
        if case.outcome == CaseOutcome::Fail {
            println!();
            println!("{} failed:", fail_str(&case.name));
            println!("  {}", case.report.as_deref().unwrap_or(""));
        }
    }
}

/// Generate and print a summary string for the tests.  Returns the outcome of the test suite
fn print_summary_string(completed_tests: &[RunTestCase], duration: Duration) -> Outcome {
    // Count the test categories
    let mut num_ok = 0;
    let mut num_failures = 0;
    let mut num_unspecified = 0;
    for case in completed_tests {
        match case.outcome {
            CaseOutcome::Ok | CaseOutcome::Parsed => num_ok += 1,
            CaseOutcome::Unspecified => num_unspecified += 1,
            CaseOutcome::Fail => num_failures += 1,
        }
    }

    let outcome = if num_failures == 0 && num_unspecified == 0 {
        Outcome::Pass
    } else {
        Outcome::Fail
    };
    println!();
    println!(
        "test result: {}. {} passed; {} unspecified; {} failed in {:.2?}",
        outcome.colored_string(),
        num_ok,
        num_unspecified,
        num_failures,
        duration
    );
    if num_unspecified > 0 {
        println!(
            "{}: add entries for the new tests to `{}`.",
            "note".white().bold(),
            EXPECTED_RESULTS_PATH.bright_white()
        );
    }
    outcome
}

/////////////////////
// TEST CASE TYPES //
/////////////////////

#[derive(Debug)]
struct UnrunTestCase {
    /// Path relative to the `braider` directory, used as the key in `expected.toml`
    name: String,
    /// Path relative to the current directory
    path: PathBuf,
    dir_type: DirType,
    expected: Option<Expectation>,
}

#[derive(Debug)]
struct RunTestCase {
    base: UnrunTestCase,
    outcome: CaseOutcome,
    /// Details to print if this case didn't pass
    report: Option<String>,
}

impl std::ops::Deref for RunTestCase {
    type Target = UnrunTestCase;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

/// The outcomes of a test, corresponding to what's printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseOutcome {
    Ok,
    Parsed,
    Unspecified,
    Fail,
}

impl CaseOutcome {
    fn colored_string(self) -> ColoredString {
        match self {
            Self::Ok => ok_string(),
            Self::Parsed => "parsed".color(Color::Green),
            Self::Unspecified => "unspecified".color(UNSPECIFIED_COLOR),
            Self::Fail => fail_string(),
        }
    }
}

///////////
// UTILS //
///////////

fn unspecified_str(s: &str) -> ColoredString {
    s.color(UNSPECIFIED_COLOR).bold()
}

fn fail_str(s: &str) -> ColoredString {
    s.color(FAIL_COLOR).bold()
}

fn ok_string() -> ColoredString {
    "ok".color(Color::Green)
}

fn fail_string() -> ColoredString {
    "fail".color(FAIL_COLOR)
}

const FAIL_COLOR: Color = Color::BrightRed;
const UNSPECIFIED_COLOR: Color = Color::BrightBlue;
