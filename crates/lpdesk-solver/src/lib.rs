mod interior;
mod problem;
mod simplex;
mod solution;

pub use problem::{Constraint, ConstraintOp, LpProblem, Objective, ProblemError};
pub use simplex::{Engine, Solver};
pub use solution::{Analysis, ConstraintAnalysis, ReducedCost, Solution, SolutionStatus};
