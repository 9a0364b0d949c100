use thiserror::Error;

use crate::ast::{ModelSource, Term};
use crate::model::check_variable_count;
use crate::parser::{ParseError, Parser};
use crate::session::{Session, SessionError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Model has no objective line (start one with max or min)")]
    MissingObjective,
    #[error("Model declares more than one objective")]
    DuplicateObjective,
    #[error("x{variable} is used but the model has only {count} variables")]
    VariableOutOfRange { variable: usize, count: usize },
}

fn out_of_range(term: &Term, count: usize) -> LoadError {
    LoadError::VariableOutOfRange {
        variable: term.variable,
        count,
    }
}

/// Turn a parsed model file into a validated session
pub fn session_from_model(model: &ModelSource) -> Result<Session, LoadError> {
    let objectives = model
        .items
        .iter()
        .filter(|item| matches!(item, crate::ast::Statement::Objective(_)))
        .count();
    if objectives > 1 {
        return Err(LoadError::DuplicateObjective);
    }
    let objective = model.objective().ok_or(LoadError::MissingObjective)?;

    // The count comes straight from the file; bound it before sizing any row
    let count = model.variable_count();
    check_variable_count(count)?;
    let coefficients = objective.expr.to_dense(count).map_err(|t| out_of_range(t, count))?;

    let constraints = model
        .constraints()
        .map(|line| line.to_input(count).map_err(|t| out_of_range(t, count)))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(variables = count, constraints = constraints.len(), "model file loaded");
    Ok(Session::with_inputs(objective.direction, coefficients, constraints)?)
}

/// Parse model text such as
///
/// ```text
/// max 3x1 + 2x2
/// x1 + x2 <= 4
/// ```
pub fn load_session(source: &str) -> Result<Session, LoadError> {
    let model = Parser::parse(source)?;
    session_from_model(&model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstraintInput, Direction, Operator, Status};
    use lpdesk_solver::Solver;

    #[test]
    fn test_load_and_solve() {
        let mut session = load_session("max 3x1 + 2x2\nx1 + x2 <= 4\n").unwrap();
        assert_eq!(session.variable_count(), 2);
        assert_eq!(session.direction(), Direction::Max);
        assert_eq!(session.constraints(), [ConstraintInput::new(vec![1.0, 1.0], Operator::Le, 4.0)]);

        let solution = session.solve(&Solver::new()).unwrap();
        assert_eq!(solution.status, Status::Optimal);
        assert!((solution.objective_value.unwrap() - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_objective() {
        assert_eq!(load_session("x1 + x2 <= 4").unwrap_err(), LoadError::MissingObjective);
    }

    #[test]
    fn test_duplicate_objective() {
        assert_eq!(
            load_session("max x1\nmin x2\nx1 <= 1").unwrap_err(),
            LoadError::DuplicateObjective
        );
    }

    #[test]
    fn test_declared_count_too_small() {
        let err = load_session("vars 2\nmax x1 + x3\nx1 <= 1").unwrap_err();
        assert_eq!(err, LoadError::VariableOutOfRange { variable: 3, count: 2 });
    }

    #[test]
    fn test_session_limits_apply() {
        let err = load_session("max x5\nx5 <= 1").unwrap_err();
        assert_eq!(err, LoadError::Session(SessionError::VariableCount(5)));

        let err = load_session("max x1 + x2").unwrap_err();
        assert_eq!(err, LoadError::Session(SessionError::ConstraintCount(0)));
    }

    #[test]
    fn test_huge_counts_rejected_before_allocating() {
        let err = load_session("vars 18446744073709551615\nmax x1\nx1 <= 1").unwrap_err();
        assert_eq!(err, LoadError::Session(SessionError::VariableCount(usize::MAX)));

        let err = load_session("max x18446744073709551615\nx1 <= 1").unwrap_err();
        assert_eq!(err, LoadError::Session(SessionError::VariableCount(usize::MAX)));

        let err = load_session("vars 1000000000\nmax x1\nx1 <= 1").unwrap_err();
        assert_eq!(err, LoadError::Session(SessionError::VariableCount(1_000_000_000)));
    }

    #[test]
    fn test_parse_errors_surface() {
        assert!(matches!(load_session("max x1\nx1 <"), Err(LoadError::Parse(_))));
    }
}
