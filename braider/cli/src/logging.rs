//! Code for printing solutions and the progress updates provided by Braider

use std::{fmt::Write, io::Write as IoWrite};

use braider::{Progress, Solution, Update};
use colored::Colorize;
use cordframe::{Family, KnotNotation, MethodRow, Pattern};
use itertools::Itertools;
use knotwork_utils::BigNumInt;
use log::log_enabled;

/// Struct which handles logging updates, keeping the updates to a single line which updates as the
/// search progresses.
pub struct SingleLineProgressLogger {
    last_progress: Progress,
    /// The number of characters in the last line we printed.  The logger will add enough spaces to
    /// the end of the next message to completely overwrite the last one
    last_line_length: usize,
}

impl SingleLineProgressLogger {
    pub fn new() -> Self {
        Self {
            last_progress: Progress::default(),
            last_line_length: 0,
        }
    }

    pub fn log(&mut self, update: Update) {
        // Early return if we can't log anything
        if !log_enabled!(log::Level::Info) {
            return;
        }

        let mut update_string = String::new();
        match update {
            Update::Progress(progress) => {
                self.last_progress = progress;
                self.append_progress_string(&mut update_string);
            }
            // Clear the progress line, so that it doesn't get mixed up with the results
            Update::Complete => {}
        }
        let update_string = self.extend_string(&update_string);

        let std_err = std::io::stderr();
        let mut std_err = std_err.lock();
        // Surround with carriage returns to make sure that we overwrite anything the user types
        // (e.g. `^C`)
        write!(std_err, "\r{}\r", update_string).unwrap();
        std_err.flush().unwrap();
    }

    /// Append a progress summary to some [`String`] buffer
    fn append_progress_string(&self, buf: &mut String) {
        let p = self.last_progress;
        write!(
            buf,
            "    {} rows tied, {} braids :: {}/{} jobs complete",
            BigNumInt(p.steps),
            BigNumInt(p.num_solutions),
            BigNumInt(p.jobs_complete),
            BigNumInt(p.num_jobs),
        )
        .unwrap();
        if p.aborting {
            buf.push_str(".  Aborting...");
        }
    }

    /// Add whitespace to the end of a string to make sure it will cover the last thing we printed.
    /// This updates `self.last_line_length` for the next update.
    fn extend_string(&mut self, s: &str) -> String {
        let num_spaces = self.last_line_length.saturating_sub(s.len());
        let mut output = s.to_owned();
        push_multiple(' ', num_spaces, &mut output);
        self.last_line_length = s.len();
        output
    }
}

impl Default for SingleLineProgressLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Struct which formats [`Solution`]s as tables, with one line per row of knots
#[derive(Debug, Clone)]
pub struct SolutionPrinter {
    notation: KnotNotation,
    colored: bool,

    /* COLUMN WIDTH INFORMATION */
    row_idx_width: usize,
    /// Width of the longest [`MethodRow`] in the chosen notation
    knots_width: usize,
    strands_width: usize,
}

impl SolutionPrinter {
    pub fn new(pattern: &Pattern, notation: KnotNotation, colored: bool) -> Self {
        let max_knots = pattern.rows().iter().map(|r| r.len()).max().unwrap_or(0);
        let knot_width = cordframe::KnotType::ALL
            .iter()
            .map(|k| k.name(notation).chars().count())
            .max()
            .unwrap_or(0);
        Self {
            notation,
            colored,

            row_idx_width: pattern.num_rows().to_string().len().max(3),
            knots_width: (max_knots * (knot_width + 1)).saturating_sub(1).max(5),
            // Widened for each solution to fit its arrangements
            strands_width: "strands after".len(),
        }
    }

    /// Create some lines which show the given [`Solution`], with a title line, column headers, a
    /// ruleoff and then one line per row of knots.  `rank` is the 0-indexed position of this
    /// `Solution` in the output.
    pub fn solution_string(&self, rank: usize, solution: &Solution) -> String {
        let strands_width = solution
            .states()
            .iter()
            .map(|s| s.to_string().len())
            .max()
            .unwrap_or(0)
            .max(self.strands_width);

        let mut s = String::new();
        writeln!(
            s,
            "#{}: score {}, starting from {}",
            rank + 1,
            solution.score(),
            solution.start()
        )
        .unwrap();
        let header = self.header(strands_width);
        writeln!(s, "{}", header).unwrap();
        writeln!(s, "{}", ruleoff(&header)).unwrap();
        for (idx, (method_row, state)) in solution
            .method_rows()
            .iter()
            .zip_eq(&solution.states()[1..])
            .enumerate()
        {
            write!(s, "{:>width$} | ", idx + 1, width = self.row_idx_width).unwrap();
            s.push_str(&self.method_row_string(method_row));
            writeln!(s, " | {}", state).unwrap();
        }
        s
    }

    fn header(&self, strands_width: usize) -> String {
        let mut s = String::new();
        write_centered_text(&mut s, "row", self.row_idx_width);
        s.push_str(" | ");
        write_centered_text(&mut s, "knots", self.knots_width);
        s.push_str(" | ");
        write_centered_text(&mut s, "strands after", strands_width);
        s
    }

    /// The knots of a [`MethodRow`], padded to the width of the knots column.  If enabled, swapping
    /// knots are coloured differently to non-swapping knots.
    fn method_row_string(&self, method_row: &MethodRow) -> String {
        let plain = method_row.to_string_with(self.notation);
        let padding = self.knots_width.saturating_sub(plain.chars().count());
        let mut s = if self.colored {
            method_row
                .iter()
                .map(|knot| {
                    let name = knot.name(self.notation);
                    match knot.family() {
                        Family::Swapping => name.yellow().to_string(),
                        Family::NonSwapping => name.green().to_string(),
                    }
                })
                .join(" ")
        } else {
            plain
        };
        push_multiple(' ', padding, &mut s);
        s
    }
}

/// Ruleoff is the same as header, but with every non-'|' char replaced with '-'
fn ruleoff(header: &str) -> String {
    header
        .chars()
        .map(|c| if c == '|' { '|' } else { '-' })
        .collect::<String>()
}

/// Write some `string` to `out`, centering it among `width` spaces (rounding to the right).
fn write_centered_text(out: &mut String, text: &str, width: usize) {
    let w = width.saturating_sub(text.len());
    push_multiple(' ', w - (w / 2), out);
    out.push_str(text);
    push_multiple(' ', w / 2, out);
}

/// Push `n` copies of `c` to the end of `out`
fn push_multiple(c: char, n: usize, out: &mut String) {
    out.extend(std::iter::repeat(c).take(n));
}
