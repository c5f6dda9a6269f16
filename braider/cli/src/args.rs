use std::path::PathBuf;

use cordframe::KnotNotation;
use log::LevelFilter;
use structopt::StructOpt;

use crate::DebugOption;

/// A struct storing the CLI args taken by Braider.  `StructOpt` will generate the argument
/// parsing/help code for us.
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "Braider",
    about = "Exhaustive search engine for repeating friendship-bracelet braids"
)]
pub struct CliArgs {
    /// The name of the request file for Braider (`*.toml`)
    #[structopt(parse(from_os_str))]
    pub input_file: PathBuf,

    #[structopt(flatten)]
    pub options: Options,

    /// Makes Braider print more output (`-vv` will produce all output).
    #[structopt(short, long = "verbose", parse(from_occurrences))]
    pub verbosity: usize,
    /// Makes Braider print less output (`-qq` will only produce errors).
    #[structopt(short, long = "quiet", parse(from_occurrences))]
    pub quietness: usize,
}

// Parameters passed directly into `braider_cli::run`, used to generate the [`braider::Config`]
// for the search and to decide how the results are printed.  This isn't a doc-comment because doc
// comments override `#[structopt(about = "...")]`.
#[derive(Default, Debug, Clone, StructOpt)]
pub struct Options {
    /// The maximum number of threads that Braider will use.  Defaults to the number of CPU cores.
    #[structopt(short = "T", long)]
    pub num_threads: Option<usize>,
    /// The maximum number of rows that Braider will tie before giving up (e.g. `500K` or `2M`).
    /// Overrides `step_limit` in the request file.
    #[structopt(long, parse(try_from_str = parse_big_int))]
    pub step_limit: Option<usize>,
    /// The maximum number of seconds that the search can run for.  Overrides `time_limit` in the
    /// request file.
    #[structopt(long)]
    pub time_limit: Option<f64>,
    /// When inferring the starting arrangement, the maximum number of arrangements which will be
    /// tried.  Overrides `candidate_limit` in the request file.
    #[structopt(long, parse(try_from_str = parse_big_int))]
    pub candidate_limit: Option<usize>,

    /// How many of the most concise braids to print.  Defaults to 5.
    #[structopt(short = "n", long)]
    pub num_solutions: Option<usize>,
    /// How to write knots: `abbreviated` (`RR`, `LL`, `RL`, `LR`) or `hanzi` (`右右`, ...).
    #[structopt(long)]
    pub notation: Option<KnotNotation>,
    /// Print the result as a single JSON object, instead of as a table.
    #[structopt(long)]
    pub json: bool,

    /// Debug options.  `request` and `params` print the corresponding data structures.
    /// `no-search` will run as normal but stop just before starting the search.
    #[structopt(short = "D", long)]
    pub debug_option: Option<DebugOption>,
}

impl CliArgs {
    /// Parse the `-q`/`-v` args into the [`LevelFilter`] to give to the `log` library
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity as isize - self.quietness as isize {
            x if x < -2 => LevelFilter::Off, // -qqq (or more `q`s)
            -2 => LevelFilter::Error,        // -qq
            -1 => LevelFilter::Warn,         // -q
            0 => LevelFilter::Info,          // <none of -q or -v>
            1 => LevelFilter::Debug,         // -v
            _ => LevelFilter::Trace,         // -vv (or more `v`s)
        }
    }
}

/// Parse a big integer like '100' or '140M'
fn parse_big_int(s: &str) -> anyhow::Result<usize> {
    let Some((last_char_idx, last_char)) = s.char_indices().last() else {
        return Err(anyhow::Error::msg("Expected a number"));
    };
    let mut number_string = &s[..last_char_idx];
    let multiplier = match last_char {
        'k' | 'K' => 1_000,
        'm' | 'M' => 1_000_000,
        'g' | 'G' => 1_000_000_000,
        '0'..='9' => {
            number_string = s; // Part of the number
            1
        }
        _ => {
            return Err(anyhow::Error::msg(
                "Expected number with a multiplier from [KMG]",
            ));
        }
    };
    number_string
        .parse::<usize>()?
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::Error::msg(format!("{} is too large", s)))
}
