//! Depth-first search over the rows of a pattern

use cordframe::{Arrangement, MethodRow, Parity, Pattern};

use crate::{row_solver, Result, Solution};

use super::{worker::Budget, Job};

/// Finds every [`Solution`] in the sub-tree described by a [`Job`], in enumeration order
pub(super) fn explore_job(
    pattern: &Pattern,
    job: Job,
    budget: &mut Budget,
) -> Result<Vec<Solution>> {
    budget.check()?;
    let backtracker = match job {
        Job::FirstRow { start, choice } => {
            budget.step()?;
            Backtracker {
                pattern,
                closure: start.clone(),
                method_rows: vec![choice.method_row],
                states: vec![start, choice.next],
                solutions: Vec::new(),
            }
        }
        Job::Candidate(start) => Backtracker {
            pattern,
            closure: start.clone(),
            method_rows: Vec::new(),
            states: vec![start],
            solutions: Vec::new(),
        },
    };
    backtracker.run(budget)
}

/// The state of a depth-first search.  `method_rows` and `states` form a stack which is pushed
/// to when a row is tied and popped when the search backtracks; at any point,
/// `states.len() == method_rows.len() + 1`.
#[derive(Debug)]
struct Backtracker<'p> {
    pattern: &'p Pattern,
    /// The arrangement that the strands must finish in
    closure: Arrangement,
    method_rows: Vec<MethodRow>,
    states: Vec<Arrangement>,
    solutions: Vec<Solution>,
}

impl Backtracker<'_> {
    fn run(mut self, budget: &mut Budget) -> Result<Vec<Solution>> {
        self.explore(budget)?;
        Ok(self.solutions)
    }

    fn explore(&mut self, budget: &mut Budget) -> Result<()> {
        let row_idx = self.method_rows.len();
        // Cloned so that the stack can be pushed to while this row's choices are generated
        let state = self.states.last().unwrap().clone();

        // Once every row is tied, accept the braid only if the strands are back where they began
        let pattern = self.pattern;
        let Some(target) = pattern.rows().get(row_idx) else {
            if state == self.closure {
                let solution = Solution::new(self.method_rows.clone(), self.states.clone());
                log::trace!("Found {}", solution);
                self.solutions.push(solution);
            }
            return Ok(());
        };

        // Otherwise, try every way of tying the next row.  If there are none, this branch is
        // dead and we backtrack.  Each choice counts as one step, whether or not it leads to a
        // braid.
        for choice in row_solver::solve_row(&state, target, Parity::of_row(row_idx)) {
            budget.step()?;
            self.method_rows.push(choice.method_row);
            self.states.push(choice.next);
            self.explore(budget)?;
            self.method_rows.pop();
            self.states.pop();
        }
        Ok(())
    }
}
