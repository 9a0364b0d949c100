pub mod ast;
pub mod lexer;
pub mod loader;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use ast::*;
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use loader::{load_session, session_from_model, LoadError};
pub use model::{
    build_model, ConstraintInput, ConstraintSensitivity, Direction, Model, Operator, Solution, Status, VariableValue,
    MAX_CONSTRAINTS, MAX_VARIABLES, MIN_CONSTRAINTS, MIN_VARIABLES,
};
pub use parser::{ParseError, Parser};
pub use report::format_value;
pub use session::{Session, SessionError};
