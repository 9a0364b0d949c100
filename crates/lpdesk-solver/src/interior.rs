//! Interior-point engine backed by `good_lp` and its Clarabel backend
//!
//! Clarabel solves `min c'x` subject to `Ax + s = b` with `s` in a cone and
//! reports the cone multipliers `z`. `good_lp` lays out `lhs <= rhs` and
//! `lhs == rhs` as a row `lhs` with `b = rhs`, and `lhs >= rhs` as `-lhs` with
//! `b = -rhs`, so the derivative of the minimized objective with respect to a
//! row's own right-hand side is `-orient * z`.

use good_lp::constraint::{eq, geq, leq};
use good_lp::{
    clarabel, variable, Constraint as LpConstraint, DualValues, Expression, ProblemVariables, ResolutionError,
    Solution as _, SolutionWithDual, SolverModel, Variable,
};

use crate::problem::{Constraint, ConstraintOp, LpProblem};
use crate::solution::{Analysis, ConstraintAnalysis, ReducedCost, Solution, SolutionStatus};

/// Improvement along a unit-boxed ray above this means the objective has no bound
const RAY_TOLERANCE: f64 = 1e-6;

fn linear(coefficients: &[f64], vars: &[Variable]) -> Expression {
    coefficients.iter().zip(vars).map(|(&c, &v)| c * v).sum()
}

fn row(constraint: &Constraint, vars: &[Variable], rhs: f64) -> LpConstraint {
    let lhs = linear(&constraint.coefficients, vars);
    match constraint.op {
        ConstraintOp::Le => leq(lhs, rhs),
        ConstraintOp::Ge => geq(lhs, rhs),
        ConstraintOp::Eq => eq(lhs, rhs),
    }
}

fn orient(op: ConstraintOp) -> f64 {
    match op {
        ConstraintOp::Le | ConstraintOp::Eq => 1.0,
        ConstraintOp::Ge => -1.0,
    }
}

pub(crate) fn solve(problem: &LpProblem, tolerance: f64) -> Solution {
    let snap = |value: f64| if value.abs() < tolerance { 0.0 } else { value };
    let minimize = problem.objective.minimize;

    let mut vars = ProblemVariables::new();
    let xs = vars.add_vector(variable().min(0.0), problem.num_variables());
    let objective = linear(&problem.objective.coefficients, &xs);
    let unsolved = if minimize {
        vars.minimise(objective)
    } else {
        vars.maximise(objective)
    };

    let mut model = unsolved.using(clarabel);
    let references: Vec<_> = problem
        .constraints
        .iter()
        .map(|c| model.add_constraint(row(c, &xs, c.rhs)))
        .collect();

    let mut raw = match model.solve() {
        Ok(raw) => raw,
        Err(ResolutionError::Infeasible) => return Solution::infeasible(),
        Err(ResolutionError::Unbounded) => return Solution::unbounded(),
        Err(e) => {
            tracing::debug!(error = %e, "clarabel stopped without a verdict");
            return Solution::failed();
        }
    };

    // Clarabel hands back a dual-infeasible run as a solution; look for a ray
    if has_improving_ray(problem) {
        return Solution::unbounded();
    }

    let values: Vec<f64> = xs.iter().map(|&x| snap(raw.value(x))).collect();
    let objective_value = snap(problem.objective.coefficients.iter().zip(&values).map(|(c, v)| c * v).sum());

    let sense = if minimize { -1.0 } else { 1.0 };
    let duals = raw.compute_dual();
    let shadow_prices: Vec<f64> = problem
        .constraints
        .iter()
        .zip(references)
        .map(|(c, reference)| snap(sense * orient(c.op) * duals.dual(reference)))
        .collect();

    let constraints: Vec<ConstraintAnalysis> = problem
        .constraints
        .iter()
        .zip(&shadow_prices)
        .map(|(c, &shadow_price)| {
            let slack = snap(c.rhs - problem.lhs(c, &values));
            ConstraintAnalysis {
                constraint: c.name.clone(),
                shadow_price,
                slack,
                binding: slack == 0.0,
            }
        })
        .collect();

    let reduced_costs = problem
        .variables
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let priced: f64 = problem
                .constraints
                .iter()
                .zip(&shadow_prices)
                .map(|(c, y)| y * c.coefficients[j])
                .sum();
            ReducedCost {
                variable: name.clone(),
                value: values[j],
                reduced_cost: snap(problem.objective.coefficients[j] - priced),
                is_basic: values[j] != 0.0,
            }
        })
        .collect();

    let binding_constraints = constraints
        .iter()
        .filter(|c| c.binding)
        .map(|c| c.constraint.clone())
        .collect();

    Solution {
        status: SolutionStatus::Optimal,
        values,
        objective_value,
        analysis: Analysis {
            constraints,
            reduced_costs,
            binding_constraints,
        },
    }
}

/// Whether a nonnegative direction keeps every row satisfied and improves the objective
///
/// Only meaningful once the problem itself is known to be feasible.
fn has_improving_ray(problem: &LpProblem) -> bool {
    let mut vars = ProblemVariables::new();
    let ds = vars.add_vector(variable().min(0.0).max(1.0), problem.num_variables());
    let objective = linear(&problem.objective.coefficients, &ds);
    let unsolved = if problem.objective.minimize {
        vars.minimise(objective)
    } else {
        vars.maximise(objective)
    };

    let mut model = unsolved.using(clarabel);
    for c in &problem.constraints {
        model.add_constraint(row(c, &ds, 0.0));
    }

    match model.solve() {
        Ok(raw) => {
            let gain: f64 = problem
                .objective
                .coefficients
                .iter()
                .zip(&ds)
                .map(|(&c, &d)| c * raw.value(d))
                .sum();
            let gain = if problem.objective.minimize { -gain } else { gain };
            tracing::trace!(gain, "recession ray check");
            gain > RAY_TOLERANCE
        }
        Err(e) => {
            tracing::debug!(error = %e, "recession ray check failed");
            false
        }
    }
}
