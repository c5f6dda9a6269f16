//! The format of Braider's input files

use std::{collections::BTreeMap, path::Path, time::Duration};

use braider::{Config, Parameters, StartState};
use cordframe::{Color, Pattern};
use serde::Deserialize;

use crate::{
    args::Options,
    utils::{self, ArrangementSpec},
};

/// The contents of a request file, describing which braid to search for.  Anything given on the
/// command line overrides the corresponding value in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    /// The colours shown by each row of knots, starting with an odd row
    pattern: Pattern,
    /// The order of the strands before the first row.  If not given, the start is inferred.
    #[serde(default)]
    start: Option<ArrangementSpec>,
    /// When inferring the start, exactly how many strands there are of each colour
    #[serde(default)]
    color_counts: Option<BTreeMap<Color, usize>>,

    /* LIMITS */
    #[serde(default)]
    step_limit: Option<usize>,
    /// In seconds
    #[serde(default)]
    time_limit: Option<f64>,
    #[serde(default)]
    candidate_limit: Option<usize>,
}

impl Request {
    pub fn read_from_file(path: &Path) -> anyhow::Result<Self> {
        let toml_string = utils::read_file_to_string(path)?;
        utils::parse_toml(&toml_string)
    }

    /// Converts this `Request` into the [`Parameters`] of a search
    pub fn parameters(&self) -> anyhow::Result<Parameters> {
        let start = match (&self.start, &self.color_counts) {
            (Some(_), Some(_)) => {
                return Err(anyhow::Error::msg(
                    "`start` and `color_counts` can't both be given (`color_counts` is only used \
when inferring the start)",
                ))
            }
            (Some(start), None) => StartState::Fixed(start.to_arrangement()?),
            (None, color_counts) => StartState::Inferred {
                color_counts: color_counts
                    .as_ref()
                    .map(|counts| counts.iter().map(|(c, n)| (c.clone(), *n)).collect()),
            },
        };
        Ok(Parameters {
            pattern: self.pattern.clone(),
            start,
        })
    }

    /// Builds the [`Config`] for the search, letting the CLI `opts` override the limits in the
    /// file
    pub fn config(&self, opts: &Options) -> anyhow::Result<Config> {
        let time_limit = match opts.time_limit.or(self.time_limit) {
            Some(secs) => Some(Duration::try_from_secs_f64(secs).map_err(|e| {
                anyhow::Error::msg(format!("Invalid time limit {}: {}", secs, e))
            })?),
            None => None,
        };
        Ok(Config {
            num_threads: opts.num_threads,
            step_limit: opts.step_limit.or(self.step_limit),
            time_limit,
            candidate_limit: opts.candidate_limit.or(self.candidate_limit),
        })
    }
}
