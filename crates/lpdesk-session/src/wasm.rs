//! WASM bindings for the LP form
//!
//! The browser keeps one `WasmSession` per form and calls into it on every
//! interaction; solutions come back as plain JS objects.

use wasm_bindgen::prelude::*;

use crate::model::{check_variable_count, ConstraintInput, Direction, Operator};
use crate::parser::Parser;
use crate::session::Session;
use lpdesk_solver::Solver;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
    solver: Solver,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(variable_count: usize, direction: &str) -> Result<WasmSession, JsValue> {
        let direction: Direction = direction.parse().map_err(to_js_error)?;
        let session = Session::new(variable_count, direction).map_err(to_js_error)?;
        Ok(Self {
            session,
            solver: Solver::new(),
        })
    }

    #[wasm_bindgen(js_name = setVariableCount)]
    pub fn set_variable_count(&mut self, count: usize) -> Result<(), JsValue> {
        self.session.set_variable_count(count).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setConstraintCount)]
    pub fn set_constraint_count(&mut self, count: usize) -> Result<(), JsValue> {
        self.session.set_constraint_count(count).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setDirection)]
    pub fn set_direction(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction: Direction = direction.parse().map_err(to_js_error)?;
        self.session.set_direction(direction);
        Ok(())
    }

    #[wasm_bindgen(js_name = setObjective)]
    pub fn set_objective(&mut self, coefficients: Vec<f64>) -> Result<(), JsValue> {
        self.session.set_objective(coefficients).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setConstraint)]
    pub fn set_constraint(
        &mut self,
        index: usize,
        coefficients: Vec<f64>,
        operator: &str,
        rhs: f64,
    ) -> Result<(), JsValue> {
        let operator: Operator = operator.parse().map_err(to_js_error)?;
        self.session
            .set_constraint(index, ConstraintInput::new(coefficients, operator, rhs))
            .map_err(to_js_error)
    }

    pub fn solve(&mut self) -> Result<JsValue, JsValue> {
        let solution = self.session.solve(&self.solver).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(solution).map_err(to_js_error)
    }

    /// Replace all constraints (an array of `{coefficients, operator, rhs}`) and solve
    #[wasm_bindgen(js_name = rebuildAndResolve)]
    pub fn rebuild_and_resolve(&mut self, constraints: JsValue) -> Result<JsValue, JsValue> {
        let constraints: Vec<ConstraintInput> = serde_wasm_bindgen::from_value(constraints).map_err(to_js_error)?;
        let solution = self
            .session
            .rebuild_and_resolve(constraints, &self.solver)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(solution).map_err(to_js_error)
    }

    /// Current form state, including the last solution, as a JS object
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(value: JsValue) -> Result<WasmSession, JsValue> {
        let session: Session = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        session.validate().map_err(to_js_error)?;
        Ok(Self {
            session,
            solver: Solver::new(),
        })
    }
}

/// Parse a typed row like `x1 + 2x2 <= 4` into `{coefficients, operator, rhs}`
#[wasm_bindgen(js_name = parseRow)]
pub fn parse_row(source: &str, variable_count: usize) -> Result<JsValue, JsValue> {
    check_variable_count(variable_count).map_err(to_js_error)?;
    let line = Parser::parse_row(source).map_err(to_js_error)?;
    let input = line
        .to_input(variable_count)
        .map_err(|term| JsValue::from_str(&format!("x{} is beyond the {} selected variables", term.variable, variable_count)))?;
    serde_wasm_bindgen::to_value(&input).map_err(to_js_error)
}
