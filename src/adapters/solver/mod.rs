pub mod http;
pub mod process;

pub use http::HttpSolver;
pub use process::ProcessSolver;

use crate::domain::ports::SolveOutcome;

/// Solver programs answer `Error ...` in place of a solution when the cube
/// cannot be solved.
pub(crate) fn outcome_from_text(text: &str) -> SolveOutcome {
    let solution = text.trim();
    if solution.starts_with("Error") {
        SolveOutcome::Unsolvable
    } else {
        SolveOutcome::Solved(solution.to_string())
    }
}
