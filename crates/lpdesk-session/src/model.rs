use std::fmt;
use std::str::FromStr;

use lpdesk_solver::{ConstraintOp, LpProblem, SolutionStatus, Solver};

use crate::session::SessionError;

/// Supported range for the number of decision variables
pub const MIN_VARIABLES: usize = 2;
pub const MAX_VARIABLES: usize = 4;

/// Supported range for the number of constraints
pub const MIN_CONSTRAINTS: usize = 1;
pub const MAX_CONSTRAINTS: usize = 10;

/// Label prefix for constraints entered through the main form
pub const INITIAL_PREFIX: &str = "R";
/// Label prefix for constraints inserted by a rebuild
pub const REBUILD_PREFIX: &str = "ModR";

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Max,
    Min,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Max => write!(f, "max"),
            Direction::Min => write!(f, "min"),
        }
    }
}

impl FromStr for Direction {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "maximize" => Ok(Direction::Max),
            "min" | "minimize" => Ok(Direction::Min),
            _ => Err(SessionError::UnknownDirection(s.to_string())),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    Le,
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    Ge,
    #[cfg_attr(feature = "serde", serde(rename = "==", alias = "="))]
    Eq,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Le => write!(f, "<="),
            Operator::Ge => write!(f, ">="),
            Operator::Eq => write!(f, "=="),
        }
    }
}

impl FromStr for Operator {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            "==" | "=" => Ok(Operator::Eq),
            _ => Err(SessionError::UnknownOperator(s.to_string())),
        }
    }
}

impl From<Operator> for ConstraintOp {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Le => ConstraintOp::Le,
            Operator::Ge => ConstraintOp::Ge,
            Operator::Eq => ConstraintOp::Eq,
        }
    }
}

/// One row of the constraint form: `coefficients · x  operator  rhs`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintInput {
    pub coefficients: Vec<f64>,
    pub operator: Operator,
    pub rhs: f64,
}

impl ConstraintInput {
    pub fn new(coefficients: Vec<f64>, operator: Operator, rhs: f64) -> Self {
        Self {
            coefficients,
            operator,
            rhs,
        }
    }

    /// The row a fresh form shows: all ones, `<=`, right-hand side 1
    pub fn default_for(variable_count: usize) -> Self {
        Self::new(vec![1.0; variable_count], Operator::Le, 1.0)
    }
}

/// Outcome category reported to the user
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    Other,
}

impl From<SolutionStatus> for Status {
    fn from(status: SolutionStatus) -> Self {
        match status {
            SolutionStatus::Optimal => Status::Optimal,
            SolutionStatus::Infeasible => Status::Infeasible,
            SolutionStatus::Unbounded => Status::Unbounded,
            SolutionStatus::IterationLimit | SolutionStatus::Malformed | SolutionStatus::Failed => Status::Other,
        }
    }
}

impl Status {
    /// Fixed explanation shown for outcomes without a solution
    pub fn message(self) -> Option<&'static str> {
        match self {
            Status::Optimal => None,
            Status::Infeasible => Some("The problem is infeasible: no solution satisfies all constraints."),
            Status::Unbounded => Some("The problem is unbounded: the objective can grow without bound."),
            Status::Other => Some("Could not solve the problem."),
        }
    }

    /// Explanation shown when the outcome follows a constraint rebuild
    pub fn rebuild_message(self) -> Option<&'static str> {
        match self {
            Status::Optimal => None,
            Status::Infeasible => Some("The new constraints made the problem infeasible."),
            Status::Unbounded => Some("The modified problem is unbounded."),
            Status::Other => Some("Could not solve the problem with the new constraints."),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Optimal => write!(f, "Optimal"),
            Status::Infeasible => write!(f, "Infeasible"),
            Status::Unbounded => write!(f, "Unbounded"),
            Status::Other => write!(f, "Not Solved"),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VariableValue {
    pub name: String,
    pub value: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSensitivity {
    pub label: String,
    pub shadow_price: f64,
    pub slack: f64,
}

/// What a solve reports back: values and sensitivity only when optimal
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: Status,
    pub values: Vec<VariableValue>,
    pub objective_value: Option<f64>,
    pub sensitivity: Vec<ConstraintSensitivity>,
    /// Set when the solve followed a constraint rebuild
    #[cfg_attr(feature = "serde", serde(default))]
    pub rebuilt: bool,
}

impl Solution {
    fn from_raw(raw: lpdesk_solver::Solution, problem: &LpProblem) -> Self {
        let status = Status::from(raw.status);
        if status != Status::Optimal {
            return Self {
                status,
                values: Vec::new(),
                objective_value: None,
                sensitivity: Vec::new(),
                rebuilt: false,
            };
        }

        let values = problem
            .variables
            .iter()
            .zip(&raw.values)
            .map(|(name, &value)| VariableValue {
                name: name.clone(),
                value,
            })
            .collect();

        let sensitivity = raw
            .analysis
            .constraints
            .into_iter()
            .map(|c| ConstraintSensitivity {
                label: c.constraint,
                shadow_price: c.shadow_price,
                slack: c.slack,
            })
            .collect();

        Self {
            status,
            values,
            objective_value: Some(raw.objective_value),
            sensitivity,
            rebuilt: false,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == Status::Optimal
    }

    /// The fixed message for a non-optimal outcome, worded for a rebuild when there was one
    pub fn message(&self) -> Option<&'static str> {
        if self.rebuilt {
            self.status.rebuild_message()
        } else {
            self.status.message()
        }
    }

    /// Value of a variable by name, if the solve was optimal
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|v| v.name == name).map(|v| v.value)
    }

    /// Sensitivity row by constraint label
    pub fn sensitivity_for(&self, label: &str) -> Option<&ConstraintSensitivity> {
        self.sensitivity.iter().find(|s| s.label == label)
    }
}

/// A built linear program: fixed variables `x1..xN`, one objective, labelled constraints
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    direction: Direction,
    problem: LpProblem,
}

/// Build a model from form inputs
pub fn build_model(
    variable_count: usize,
    direction: Direction,
    objective: &[f64],
    constraints: &[ConstraintInput],
) -> Result<Model, SessionError> {
    Model::build(variable_count, direction, objective, constraints)
}

impl Model {
    pub fn build(
        variable_count: usize,
        direction: Direction,
        objective: &[f64],
        constraints: &[ConstraintInput],
    ) -> Result<Self, SessionError> {
        check_variable_count(variable_count)?;
        check_arity("objective", variable_count, objective.len())?;
        check_constraints(variable_count, constraints)?;

        let variables = (1..=variable_count).map(|i| format!("x{}", i)).collect();
        let mut problem = LpProblem::new(variables);
        problem.set_objective(objective.to_vec(), direction == Direction::Min);

        let mut model = Self { direction, problem };
        model.replace_constraints(constraints, INITIAL_PREFIX);
        Ok(model)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn variables(&self) -> &[String] {
        &self.problem.variables
    }

    pub fn variable_count(&self) -> usize {
        self.problem.num_variables()
    }

    pub fn constraint_labels(&self) -> Vec<&str> {
        self.problem.constraints.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn problem(&self) -> &LpProblem {
        &self.problem
    }

    /// Solve once and map the solver's outcome
    pub fn solve(&self, solver: &Solver) -> Solution {
        let raw = solver.solve(&self.problem);
        tracing::debug!(status = ?raw.status, constraints = self.problem.num_constraints(), "model solved");
        Solution::from_raw(raw, &self.problem)
    }

    /// Replace every constraint with `new_constraints` and solve again
    ///
    /// The variables and objective are kept. If the new rows do not match the
    /// model's arity the model is left untouched.
    pub fn rebuild_and_resolve(
        &mut self,
        new_constraints: &[ConstraintInput],
        solver: &Solver,
    ) -> Result<Solution, SessionError> {
        check_constraints(self.variable_count(), new_constraints)?;
        tracing::debug!(
            dropped = self.problem.num_constraints(),
            inserted = new_constraints.len(),
            "rebuilding constraints"
        );
        self.replace_constraints(new_constraints, REBUILD_PREFIX);
        let mut solution = self.solve(solver);
        solution.rebuilt = true;
        Ok(solution)
    }

    fn replace_constraints(&mut self, constraints: &[ConstraintInput], prefix: &str) {
        self.problem.clear_constraints();
        for (i, c) in constraints.iter().enumerate() {
            self.problem.add_constraint(
                format!("{}{}", prefix, i),
                c.coefficients.clone(),
                c.operator.into(),
                c.rhs,
            );
        }
    }
}

pub(crate) fn check_variable_count(count: usize) -> Result<(), SessionError> {
    if (MIN_VARIABLES..=MAX_VARIABLES).contains(&count) {
        Ok(())
    } else {
        Err(SessionError::VariableCount(count))
    }
}

pub(crate) fn check_constraint_count(count: usize) -> Result<(), SessionError> {
    if (MIN_CONSTRAINTS..=MAX_CONSTRAINTS).contains(&count) {
        Ok(())
    } else {
        Err(SessionError::ConstraintCount(count))
    }
}

pub(crate) fn check_arity(what: &str, expected: usize, found: usize) -> Result<(), SessionError> {
    if expected == found {
        Ok(())
    } else {
        Err(SessionError::Arity {
            what: what.to_string(),
            expected,
            found,
        })
    }
}

fn check_constraints(variable_count: usize, constraints: &[ConstraintInput]) -> Result<(), SessionError> {
    if constraints.len() > MAX_CONSTRAINTS {
        return Err(SessionError::ConstraintCount(constraints.len()));
    }
    for (i, c) in constraints.iter().enumerate() {
        check_arity(&format!("constraint {}", i + 1), variable_count, c.coefficients.len())?;
    }
    Ok(())
}
