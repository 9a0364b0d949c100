use crate::lexer::Span;
use crate::model::{ConstraintInput, Direction, Operator};

/// A parsed model file: one statement per line
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSource {
    pub items: Vec<Statement>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Vars(VarsDecl),
    Objective(ObjectiveLine),
    Constraint(ConstraintLine),
}

/// `vars 3`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VarsDecl {
    pub span: Span,
    pub count: usize,
}

/// `max 3x1 + 2x2`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveLine {
    pub span: Span,
    pub direction: Direction,
    pub expr: LinearExpr,
}

/// `x1 + x2 <= 4`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintLine {
    pub span: Span,
    pub expr: LinearExpr,
    pub operator: Operator,
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LinearExpr {
    pub span: Span,
    pub terms: Vec<Term>,
}

/// `coefficient * x{variable}`, variable numbered from 1
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub span: Span,
    pub coefficient: f64,
    pub variable: usize,
}

impl LinearExpr {
    /// Highest variable index referenced, 0 for an empty expression
    pub fn max_variable(&self) -> usize {
        self.terms.iter().map(|t| t.variable).max().unwrap_or(0)
    }

    /// Dense coefficient vector of length `variable_count`; repeated variables add up
    ///
    /// Returns the offending term when it names a variable beyond the count.
    pub fn to_dense(&self, variable_count: usize) -> Result<Vec<f64>, &Term> {
        let mut coefficients = vec![0.0; variable_count];
        for term in &self.terms {
            match coefficients.get_mut(term.variable - 1) {
                Some(slot) => *slot += term.coefficient,
                None => return Err(term),
            }
        }
        Ok(coefficients)
    }
}

impl ConstraintLine {
    pub fn max_variable(&self) -> usize {
        self.expr.max_variable()
    }

    pub fn to_input(&self, variable_count: usize) -> Result<ConstraintInput, &Term> {
        Ok(ConstraintInput::new(self.expr.to_dense(variable_count)?, self.operator, self.rhs))
    }
}

impl ModelSource {
    pub fn objective(&self) -> Option<&ObjectiveLine> {
        self.items.iter().find_map(|item| match item {
            Statement::Objective(o) => Some(o),
            _ => None,
        })
    }

    pub fn constraints(&self) -> impl Iterator<Item = &ConstraintLine> {
        self.items.iter().filter_map(|item| match item {
            Statement::Constraint(c) => Some(c),
            _ => None,
        })
    }

    pub fn declared_vars(&self) -> Option<&VarsDecl> {
        self.items.iter().find_map(|item| match item {
            Statement::Vars(v) => Some(v),
            _ => None,
        })
    }

    /// Declared variable count, or the highest index used (at least 2)
    pub fn variable_count(&self) -> usize {
        if let Some(decl) = self.declared_vars() {
            return decl.count;
        }
        let objective = self.objective().map(|o| o.expr.max_variable()).unwrap_or(0);
        let constraints = self.constraints().map(|c| c.max_variable()).max().unwrap_or(0);
        objective.max(constraints).max(crate::model::MIN_VARIABLES)
    }
}
