use thiserror::Error;

/// Represents a linear programming problem over nonnegative continuous variables
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Variable names
    pub variables: Vec<String>,
    /// Objective function coefficients
    pub objective: Objective,
    /// Constraints, in insertion order
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Whether to minimize or maximize
    pub minimize: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Label for the constraint, used to key the sensitivity output
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (==)
    Eq,
}

impl ConstraintOp {
    /// The operator obtained by multiplying both sides by -1
    pub fn flipped(self) -> Self {
        match self {
            ConstraintOp::Le => ConstraintOp::Ge,
            ConstraintOp::Ge => ConstraintOp::Le,
            ConstraintOp::Eq => ConstraintOp::Eq,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Objective has {found} coefficients but the problem has {expected} variables")]
    ObjectiveArity { expected: usize, found: usize },
    #[error("Constraint {name} has {found} coefficients but the problem has {expected} variables")]
    ConstraintArity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("Non-finite value in {0}")]
    NonFinite(String),
}

impl LpProblem {
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: Objective {
                coefficients: vec![0.0; n],
                minimize: true,
            },
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>, minimize: bool) {
        self.objective = Objective { coefficients, minimize };
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, coefficients: Vec<f64>, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            op,
            rhs,
        });
    }

    /// Drop every constraint, keeping variables and objective
    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Check that every coefficient vector matches the variable count
    pub fn validate(&self) -> Result<(), ProblemError> {
        let expected = self.num_variables();
        if self.objective.coefficients.len() != expected {
            return Err(ProblemError::ObjectiveArity {
                expected,
                found: self.objective.coefficients.len(),
            });
        }
        if self.objective.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ProblemError::NonFinite("objective".to_string()));
        }

        for c in &self.constraints {
            if c.coefficients.len() != expected {
                return Err(ProblemError::ConstraintArity {
                    name: c.name.clone(),
                    expected,
                    found: c.coefficients.len(),
                });
            }
            if !c.rhs.is_finite() || c.coefficients.iter().any(|v| !v.is_finite()) {
                return Err(ProblemError::NonFinite(c.name.clone()));
            }
        }

        Ok(())
    }

    /// Evaluate the left-hand side of a constraint at a point
    pub fn lhs(&self, constraint: &Constraint, values: &[f64]) -> f64 {
        constraint
            .coefficients
            .iter()
            .zip(values)
            .map(|(coef, value)| coef * value)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_vars() -> LpProblem {
        LpProblem::new(vec!["x1".to_string(), "x2".to_string()])
    }

    #[test]
    fn test_validate_accepts_matching_arity() {
        let mut problem = two_vars();
        problem.set_objective(vec![3.0, 2.0], false);
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Le, 4.0);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_constraint() {
        let mut problem = two_vars();
        problem.add_constraint("R0", vec![1.0], ConstraintOp::Le, 4.0);
        assert_eq!(
            problem.validate(),
            Err(ProblemError::ConstraintArity {
                name: "R0".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_validate_rejects_nan_rhs() {
        let mut problem = two_vars();
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Ge, f64::NAN);
        assert!(matches!(problem.validate(), Err(ProblemError::NonFinite(_))));
    }

    #[test]
    fn test_clear_constraints_keeps_variables() {
        let mut problem = two_vars();
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Le, 4.0);
        problem.clear_constraints();
        assert_eq!(problem.num_constraints(), 0);
        assert_eq!(problem.num_variables(), 2);
    }

    #[test]
    fn test_flipped_operator() {
        assert_eq!(ConstraintOp::Le.flipped(), ConstraintOp::Ge);
        assert_eq!(ConstraintOp::Ge.flipped(), ConstraintOp::Le);
        assert_eq!(ConstraintOp::Eq.flipped(), ConstraintOp::Eq);
    }
}
