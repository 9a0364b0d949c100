use lpdesk_solver::Solver;
use thiserror::Error;

use crate::model::{
    build_model, check_arity, check_constraint_count, check_variable_count, ConstraintInput, Direction, Model,
    Solution, MAX_CONSTRAINTS, MAX_VARIABLES, MIN_CONSTRAINTS, MIN_VARIABLES,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Variable count must be between {min} and {max}, got {0}", min = MIN_VARIABLES, max = MAX_VARIABLES)]
    VariableCount(usize),
    #[error("Constraint count must be between {min} and {max}, got {0}", min = MIN_CONSTRAINTS, max = MAX_CONSTRAINTS)]
    ConstraintCount(usize),
    #[error("The {what} has {found} coefficients but {expected} variables are selected")]
    Arity {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("Constraint index {index} is out of range (session has {count})")]
    ConstraintIndex { index: usize, count: usize },
    #[error("Unknown objective direction: {0}")]
    UnknownDirection(String),
    #[error("Unknown constraint operator: {0}")]
    UnknownOperator(String),
}

/// Everything the form holds between interactions
///
/// The session owns the inputs and the last reported solution. Every mutation
/// that changes the shape of the problem drops the stale solution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    variable_count: usize,
    direction: Direction,
    objective: Vec<f64>,
    constraints: Vec<ConstraintInput>,
    #[cfg_attr(feature = "serde", serde(default))]
    last_solution: Option<Solution>,
}

impl Session {
    /// A fresh form: every objective coefficient 1, one default constraint row
    pub fn new(variable_count: usize, direction: Direction) -> Result<Self, SessionError> {
        check_variable_count(variable_count)?;
        Ok(Self {
            variable_count,
            direction,
            objective: vec![1.0; variable_count],
            constraints: vec![ConstraintInput::default_for(variable_count)],
            last_solution: None,
        })
    }

    /// Assemble a session from complete inputs, validating counts and arity
    pub fn with_inputs(
        direction: Direction,
        objective: Vec<f64>,
        constraints: Vec<ConstraintInput>,
    ) -> Result<Self, SessionError> {
        let session = Self {
            variable_count: objective.len(),
            direction,
            objective,
            constraints,
            last_solution: None,
        };
        session.validate()?;
        Ok(session)
    }

    /// Check the invariants a deserialized session may have lost
    pub fn validate(&self) -> Result<(), SessionError> {
        check_variable_count(self.variable_count)?;
        check_constraint_count(self.constraints.len())?;
        check_arity("objective", self.variable_count, self.objective.len())?;
        for (i, c) in self.constraints.iter().enumerate() {
            check_arity(&format!("constraint {}", i + 1), self.variable_count, c.coefficients.len())?;
        }
        Ok(())
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[ConstraintInput] {
        &self.constraints
    }

    pub fn last_solution(&self) -> Option<&Solution> {
        self.last_solution.as_ref()
    }

    /// Change the number of variables
    ///
    /// Existing objective coefficients are kept, new ones default to 1. Every
    /// constraint row is reset to the default with the new arity.
    pub fn set_variable_count(&mut self, count: usize) -> Result<(), SessionError> {
        check_variable_count(count)?;
        if count == self.variable_count {
            return Ok(());
        }
        tracing::debug!(from = self.variable_count, to = count, "variable count changed, resetting constraints");
        self.variable_count = count;
        self.objective.resize(count, 1.0);
        let rows = self.constraints.len();
        self.constraints = vec![ConstraintInput::default_for(count); rows];
        self.last_solution = None;
        Ok(())
    }

    /// Change the number of constraint rows; a different count resets every row
    pub fn set_constraint_count(&mut self, count: usize) -> Result<(), SessionError> {
        check_constraint_count(count)?;
        if count == self.constraints.len() {
            return Ok(());
        }
        self.constraints = vec![ConstraintInput::default_for(self.variable_count); count];
        self.last_solution = None;
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction {
            self.direction = direction;
            self.last_solution = None;
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>) -> Result<(), SessionError> {
        check_arity("objective", self.variable_count, coefficients.len())?;
        self.objective = coefficients;
        self.last_solution = None;
        Ok(())
    }

    pub fn set_constraint(&mut self, index: usize, constraint: ConstraintInput) -> Result<(), SessionError> {
        let count = self.constraints.len();
        if index >= count {
            return Err(SessionError::ConstraintIndex { index, count });
        }
        check_arity(&format!("constraint {}", index + 1), self.variable_count, constraint.coefficients.len())?;
        self.constraints[index] = constraint;
        self.last_solution = None;
        Ok(())
    }

    /// Build the model the current inputs describe
    pub fn model(&self) -> Result<Model, SessionError> {
        self.validate()?;
        build_model(self.variable_count, self.direction, &self.objective, &self.constraints)
    }

    /// Build, solve and remember the result
    pub fn solve(&mut self, solver: &Solver) -> Result<&Solution, SessionError> {
        let solution = self.model()?.solve(solver);
        tracing::debug!(status = %solution.status, "session solved");
        Ok(self.last_solution.insert(solution))
    }

    /// Replace all constraints with `new_constraints` and solve again
    ///
    /// Either the constraints and the last solution are both replaced, or on
    /// error nothing changes.
    pub fn rebuild_and_resolve(
        &mut self,
        new_constraints: Vec<ConstraintInput>,
        solver: &Solver,
    ) -> Result<&Solution, SessionError> {
        check_constraint_count(new_constraints.len())?;
        let mut model = self.model()?;
        let solution = model.rebuild_and_resolve(&new_constraints, solver)?;
        tracing::debug!(status = %solution.status, constraints = new_constraints.len(), "session rebuilt");
        self.constraints = new_constraints;
        Ok(self.last_solution.insert(solution))
    }
}
