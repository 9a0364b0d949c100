use crate::ast::*;
use crate::lexer::{Lexer, Span, Token, TokenKind};
use crate::model::{Direction, Operator};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token: expected {expected}, found {found} at position {span:?}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Invalid variable '{name}' at position {span:?}: variables are named x1, x2, ...")]
    InvalidVariable { name: String, span: Span },
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse a whole model file
    pub fn parse(source: &str) -> Result<ModelSource, ParseError> {
        let mut parser = Parser::new(Lexer::tokenize(source));
        parser.parse_model()
    }

    /// Parse a single constraint such as `x1 + 2x2 >= 3`
    pub fn parse_row(source: &str) -> Result<ConstraintLine, ParseError> {
        let mut parser = Parser::new(Lexer::tokenize(source));
        parser.skip_newlines_and_comments();
        let line = parser.parse_constraint()?;
        parser.expect_end()?;
        Ok(line)
    }

    /// Parse a single objective such as `max 3x1 + 2x2`
    pub fn parse_objective(source: &str) -> Result<ObjectiveLine, ParseError> {
        let mut parser = Parser::new(Lexer::tokenize(source));
        parser.skip_newlines_and_comments();
        let line = parser.parse_objective_line()?;
        parser.expect_end()?;
        Ok(line)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn skip_newlines_and_comments(&mut self) {
        while matches!(self.peek_kind(), TokenKind::Newline | TokenKind::Comment) {
            self.advance();
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.current() {
            Some(t) if t.kind != TokenKind::Eof => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: format!("{:?} '{}'", t.kind, t.text),
                span: t.span,
            },
            _ => ParseError::UnexpectedEof,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.peek_kind() == kind {
            self.advance().ok_or(ParseError::UnexpectedEof)
        } else {
            Err(self.unexpected(&format!("{:?}", kind)))
        }
    }

    /// A statement ends at a comment, a newline, or the end of input
    fn expect_line_end(&mut self) -> Result<(), ParseError> {
        if self.peek_kind() == TokenKind::Comment {
            self.advance();
        }
        match self.peek_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of line")),
        }
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_newlines_and_comments();
        if self.peek_kind() == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn parse_model(&mut self) -> Result<ModelSource, ParseError> {
        let mut items = Vec::new();

        loop {
            self.skip_newlines_and_comments();

            let item = match self.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::Vars => Statement::Vars(self.parse_vars()?),
                TokenKind::Max | TokenKind::Min => Statement::Objective(self.parse_objective_line()?),
                _ => Statement::Constraint(self.parse_constraint()?),
            };
            items.push(item);
            self.expect_line_end()?;
        }

        Ok(ModelSource { items })
    }

    fn parse_vars(&mut self) -> Result<VarsDecl, ParseError> {
        let start = self.expect(TokenKind::Vars)?.span;
        let token = self.expect(TokenKind::Number)?;
        let count = token
            .text
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidNumber(token.text.clone()))?;
        Ok(VarsDecl {
            span: start.merge(token.span),
            count,
        })
    }

    fn parse_objective_line(&mut self) -> Result<ObjectiveLine, ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedEof)?;
        let direction = match token.kind {
            TokenKind::Max => Direction::Max,
            TokenKind::Min => Direction::Min,
            _ => {
                self.pos -= 1;
                return Err(self.unexpected("max or min"));
            }
        };

        if self.peek_kind() == TokenKind::Colon {
            self.advance();
        }

        let expr = self.parse_expr()?;
        Ok(ObjectiveLine {
            span: token.span.merge(expr.span),
            direction,
            expr,
        })
    }

    fn parse_constraint(&mut self) -> Result<ConstraintLine, ParseError> {
        let expr = self.parse_expr()?;

        let operator = match self.peek_kind() {
            TokenKind::Le => Operator::Le,
            TokenKind::Ge => Operator::Ge,
            TokenKind::Eq => Operator::Eq,
            _ => return Err(self.unexpected("<=, >= or ==")),
        };
        self.advance();

        let negative = self.peek_kind() == TokenKind::Minus;
        if negative {
            self.advance();
        }
        let token = self.expect(TokenKind::Number)?;
        let value = parse_number(&token)?;

        Ok(ConstraintLine {
            span: expr.span.merge(token.span),
            expr,
            operator,
            rhs: if negative { -value } else { value },
        })
    }

    fn parse_expr(&mut self) -> Result<LinearExpr, ParseError> {
        let mut terms = Vec::new();

        let first_sign = self.parse_sign();
        terms.push(self.parse_term(first_sign)?);

        loop {
            let sign = match self.peek_kind() {
                TokenKind::Plus | TokenKind::Minus => self.parse_sign(),
                _ => break,
            };
            terms.push(self.parse_term(sign)?);
        }

        let span = terms
            .iter()
            .map(|t| t.span)
            .reduce(Span::merge)
            .unwrap_or(Span::new(0, 0));

        Ok(LinearExpr { span, terms })
    }

    /// Optional leading `+` or `-`
    fn parse_sign(&mut self) -> f64 {
        match self.peek_kind() {
            TokenKind::Plus => {
                self.advance();
                1.0
            }
            TokenKind::Minus => {
                self.advance();
                -1.0
            }
            _ => 1.0,
        }
    }

    fn parse_term(&mut self, sign: f64) -> Result<Term, ParseError> {
        let (coefficient, start) = match self.peek_kind() {
            TokenKind::Number => {
                let token = self.expect(TokenKind::Number)?;
                if self.peek_kind() == TokenKind::Star {
                    self.advance();
                }
                (parse_number(&token)?, Some(token.span))
            }
            TokenKind::Ident => (1.0, None),
            _ => return Err(self.unexpected("coefficient or variable")),
        };

        let token = self.expect(TokenKind::Ident)?;
        let variable = parse_variable(&token)?;

        Ok(Term {
            span: start.map_or(token.span, |s| s.merge(token.span)),
            coefficient: sign * coefficient,
            variable,
        })
    }
}

fn parse_number(token: &Token) -> Result<f64, ParseError> {
    token
        .text
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(token.text.clone()))
}

/// `x3` -> 3
fn parse_variable(token: &Token) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidVariable {
        name: token.text.clone(),
        span: token.span,
    };
    let digits = token
        .text
        .strip_prefix('x')
        .or_else(|| token.text.strip_prefix('X'))
        .ok_or_else(invalid)?;
    match digits.parse::<usize>() {
        Ok(index) if index >= 1 && digits.bytes().all(|b| b.is_ascii_digit()) => Ok(index),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row() {
        let line = Parser::parse_row("x1 + 2x2 - 0.5*x3 <= 4").unwrap();
        assert_eq!(line.operator, Operator::Le);
        assert_eq!(line.rhs, 4.0);
        let coefs: Vec<_> = line.expr.terms.iter().map(|t| (t.variable, t.coefficient)).collect();
        assert_eq!(coefs, vec![(1, 1.0), (2, 2.0), (3, -0.5)]);
        assert_eq!(line.span, Span::new(0, 22));
    }

    #[test]
    fn test_parse_row_negative_rhs_and_leading_minus() {
        let line = Parser::parse_row("-x1 + x2 >= -3").unwrap();
        assert_eq!(line.operator, Operator::Ge);
        assert_eq!(line.rhs, -3.0);
        assert_eq!(line.expr.terms[0].coefficient, -1.0);
    }

    #[test]
    fn test_parse_row_single_equals() {
        let line = Parser::parse_row("x1 = 2").unwrap();
        assert_eq!(line.operator, Operator::Eq);
    }

    #[test]
    fn test_repeated_variable_accumulates() {
        let line = Parser::parse_row("x1 + x1 + 3x2 <= 1").unwrap();
        let input = line.to_input(2).unwrap();
        assert_eq!(input.coefficients, vec![2.0, 3.0]);
    }

    #[test]
    fn test_variable_beyond_count() {
        let line = Parser::parse_row("x1 + x3 <= 1").unwrap();
        let err = line.to_input(2).unwrap_err();
        assert_eq!(err.variable, 3);
    }

    #[test]
    fn test_parse_objective() {
        let objective = Parser::parse_objective("maximize: 3x1 + 2x2").unwrap();
        assert_eq!(objective.direction, Direction::Max);
        assert_eq!(objective.expr.to_dense(2).unwrap(), vec![3.0, 2.0]);

        let objective = Parser::parse_objective("min x2").unwrap();
        assert_eq!(objective.direction, Direction::Min);
        assert_eq!(objective.expr.to_dense(3).unwrap(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_parse_model() {
        let source = r#"
            # production plan
            vars 3
            max 3x1 + 2x2 + x3
            x1 + x2 + x3 <= 10   // capacity
            x1 >= 1
        "#;
        let model = Parser::parse(source).unwrap();
        assert_eq!(model.items.len(), 4);
        assert_eq!(model.variable_count(), 3);
        assert_eq!(model.objective().map(|o| o.direction), Some(Direction::Max));
        assert_eq!(model.constraints().count(), 2);
    }

    #[test]
    fn test_variable_count_inferred() {
        let model = Parser::parse("min x1\nx1 + x4 >= 2").unwrap();
        assert_eq!(model.variable_count(), 4);

        let model = Parser::parse("max x1\nx1 <= 2").unwrap();
        assert_eq!(model.variable_count(), 2);
    }

    #[test]
    fn test_missing_operator() {
        let err = Parser::parse_row("x1 + x2 4").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_invalid_variable_names() {
        for source in ["y1 <= 1", "x0 <= 1", "x <= 1", "xa <= 1"] {
            let err = Parser::parse_row(source).unwrap_err();
            assert!(matches!(err, ParseError::InvalidVariable { .. }), "{}: {:?}", source, err);
        }
    }

    #[test]
    fn test_constant_term_rejected() {
        let err = Parser::parse_row("x1 + 3 <= 4").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_two_statements_on_one_line() {
        let err = Parser::parse("max x1 x1 <= 2").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_truncated_row() {
        assert_eq!(Parser::parse_row("x1 <=").unwrap_err(), ParseError::UnexpectedEof);
    }
}
