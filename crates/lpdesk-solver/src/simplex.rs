use crate::interior;
use crate::problem::{ConstraintOp, LpProblem};
use crate::solution::{Analysis, ConstraintAnalysis, ReducedCost, Solution, SolutionStatus};

/// Which algorithm runs the solve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Engine {
    /// Two-phase tableau simplex; optima are always vertices
    #[default]
    Simplex,
    /// Clarabel interior point through `good_lp`; a non-unique optimum comes
    /// back as a point inside the optimal face
    Interior,
}

/// LP solver for problems with nonnegative continuous variables
///
/// Every variable is continuous with a lower bound of zero and no upper bound.
#[derive(Debug, Clone)]
pub struct Solver {
    engine: Engine,
    /// Maximum pivots per phase before giving up
    max_iterations: usize,
    /// Tolerance for pivot selection
    tolerance: f64,
    /// Tolerance for feasibility, binding detection and snapping values to zero
    feasibility_tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            engine: Engine::Simplex,
            max_iterations: 10000,
            tolerance: 1e-9,
            feasibility_tolerance: 1e-7,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_feasibility_tolerance(mut self, tol: f64) -> Self {
        self.feasibility_tolerance = tol;
        self
    }

    /// Solve the LP problem with the configured engine
    pub fn solve(&self, problem: &LpProblem) -> Solution {
        tracing::debug!(
            variables = problem.num_variables(),
            constraints = problem.num_constraints(),
            minimize = problem.objective.minimize,
            engine = ?self.engine,
            "solving lp problem"
        );

        if let Err(e) = problem.validate() {
            tracing::debug!(error = %e, "problem rejected before solving");
            return self.finish(Solution::malformed());
        }

        let solution = match self.engine {
            Engine::Simplex => self.solve_simplex(problem),
            Engine::Interior => interior::solve(problem, self.feasibility_tolerance),
        };
        self.finish(solution)
    }

    fn solve_simplex(&self, problem: &LpProblem) -> Solution {
        let mut tableau = self.build_tableau(problem);

        // Phase 1: Find initial basic feasible solution
        if tableau.n_artificial > 0 {
            match self.phase1(&mut tableau) {
                SimplexResult::Optimal => {}
                SimplexResult::Infeasible => return Solution::infeasible(),
                SimplexResult::IterationLimit => return Solution::iteration_limit(),
                // Phase 1 is bounded below by zero
                SimplexResult::Unbounded => return Solution::infeasible(),
            }
        }

        // Phase 2: Optimize
        match self.phase2(&mut tableau) {
            SimplexResult::Optimal => {}
            SimplexResult::Unbounded => return Solution::unbounded(),
            SimplexResult::Infeasible => return Solution::infeasible(),
            SimplexResult::IterationLimit => return Solution::iteration_limit(),
        }

        self.extract_solution(&tableau, problem)
    }

    fn finish(&self, solution: Solution) -> Solution {
        tracing::debug!(status = ?solution.status, objective = solution.objective_value, "solve finished");
        solution
    }

    fn build_tableau(&self, problem: &LpProblem) -> Tableau {
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();

        // Rows with a negative RHS are multiplied by -1, which flips the operator
        let normalized: Vec<(bool, ConstraintOp)> = problem
            .constraints
            .iter()
            .map(|c| {
                if c.rhs < 0.0 {
                    (true, c.op.flipped())
                } else {
                    (false, c.op)
                }
            })
            .collect();

        // Count slack and artificial variables needed
        let mut n_slack = 0;
        let mut n_artificial = 0;

        for (_, op) in &normalized {
            match op {
                ConstraintOp::Le => n_slack += 1,
                ConstraintOp::Ge => {
                    n_slack += 1; // surplus
                    n_artificial += 1;
                }
                ConstraintOp::Eq => n_artificial += 1,
            }
        }

        let total_cols = n_vars + n_slack + n_artificial + 1; // +1 for RHS
        let total_rows = n_constraints + 1; // +1 for objective

        let mut tableau = Tableau {
            data: vec![vec![0.0; total_cols]; total_rows],
            basic_vars: vec![0; n_constraints],
            rows: Vec::with_capacity(n_constraints),
            n_vars,
            n_slack,
            n_artificial,
        };

        // Fill in constraint rows
        let mut slack_idx = n_vars;
        let mut artificial_idx = n_vars + n_slack;

        for (i, (c, &(flipped, op))) in problem.constraints.iter().zip(&normalized).enumerate() {
            let sign = if flipped { -1.0 } else { 1.0 };
            for (j, &coef) in c.coefficients.iter().enumerate() {
                tableau.data[i][j] = sign * coef;
            }
            tableau.data[i][total_cols - 1] = sign * c.rhs;

            // The dual column is the one whose initial entry is a signed unit vector on this row
            let row = match op {
                ConstraintOp::Le => {
                    tableau.data[i][slack_idx] = 1.0;
                    tableau.basic_vars[i] = slack_idx;
                    slack_idx += 1;
                    RowInfo { flipped, dual_col: slack_idx - 1, dual_sign: 1.0 }
                }
                ConstraintOp::Ge => {
                    tableau.data[i][slack_idx] = -1.0; // surplus
                    slack_idx += 1;
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                    RowInfo { flipped, dual_col: slack_idx - 1, dual_sign: -1.0 }
                }
                ConstraintOp::Eq => {
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                    RowInfo { flipped, dual_col: artificial_idx - 1, dual_sign: 1.0 }
                }
            };
            tableau.rows.push(row);
        }

        // Objective row (last row) holds reduced costs c - z for a maximization;
        // minimization negates the coefficients
        let obj_row = n_constraints;
        for (j, &coef) in problem.objective.coefficients.iter().enumerate() {
            tableau.data[obj_row][j] = if problem.objective.minimize { -coef } else { coef };
        }

        tableau
    }

    fn phase1(&self, tableau: &mut Tableau) -> SimplexResult {
        // Auxiliary objective: maximize -sum(artificials)
        let n_constraints = tableau.n_constraints();
        let n_cols = tableau.n_cols();
        let art_start = tableau.artificial_start();

        let orig_obj = tableau.data[n_constraints].clone();

        tableau.data[n_constraints].iter_mut().for_each(|v| *v = 0.0);
        for j in art_start..(art_start + tableau.n_artificial) {
            tableau.data[n_constraints][j] = -1.0;
        }

        // Price out the basic artificials
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] += tableau.data[i][j];
                }
            }
        }

        match self.iterate(tableau, n_cols - 1) {
            SimplexResult::Optimal => {}
            other => return other,
        }

        let rhs_col = n_cols - 1;
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start && tableau.data[i][rhs_col].abs() > self.feasibility_tolerance {
                tracing::debug!(row = i, residual = tableau.data[i][rhs_col], "phase 1 left an artificial positive");
                return SimplexResult::Infeasible;
            }
        }

        // Drive zero-level artificials out of the basis; rows where that is
        // impossible are redundant and keep the artificial at zero
        for i in 0..n_constraints {
            if tableau.basic_vars[i] < art_start {
                continue;
            }
            if let Some(col) = (0..art_start).find(|&j| tableau.data[i][j].abs() > self.tolerance) {
                self.pivot(tableau, i, col);
            } else {
                tracing::trace!(row = i, "redundant row");
            }
        }

        // Restore original objective and price out the basis
        tableau.data[n_constraints] = orig_obj;
        for i in 0..n_constraints {
            let basic = tableau.basic_vars[i];
            let ratio = tableau.data[n_constraints][basic];
            if ratio.abs() > self.tolerance {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] -= ratio * tableau.data[i][j];
                }
            }
        }

        SimplexResult::Optimal
    }

    fn phase2(&self, tableau: &mut Tableau) -> SimplexResult {
        // Artificial columns may not re-enter
        let exclude_from = tableau.artificial_start();
        self.iterate(tableau, exclude_from)
    }

    /// Pivot until no column below `col_limit` can improve the objective
    fn iterate(&self, tableau: &mut Tableau, col_limit: usize) -> SimplexResult {
        for _ in 0..self.max_iterations {
            let Some(pivot_col) = self.find_pivot_column(tableau, col_limit) else {
                return SimplexResult::Optimal;
            };
            let Some(pivot_row) = self.find_pivot_row(tableau, pivot_col) else {
                return SimplexResult::Unbounded;
            };
            self.pivot(tableau, pivot_row, pivot_col);
        }

        if self.find_pivot_column(tableau, col_limit).is_none() {
            SimplexResult::Optimal
        } else {
            SimplexResult::IterationLimit
        }
    }

    /// Bland's rule: the lowest-index column with a positive reduced cost
    fn find_pivot_column(&self, tableau: &Tableau, col_limit: usize) -> Option<usize> {
        let obj_row = tableau.n_constraints();
        (0..col_limit).find(|&j| tableau.data[obj_row][j] > self.tolerance)
    }

    /// Minimum ratio test, ties broken by the lowest basic variable index
    fn find_pivot_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let rhs_col = tableau.n_cols() - 1;

        let mut best: Option<(usize, f64)> = None;

        for i in 0..tableau.n_constraints() {
            let val = tableau.data[i][col];
            if val <= self.tolerance {
                continue;
            }
            let ratio = tableau.data[i][rhs_col] / val;
            best = match best {
                None => Some((i, ratio)),
                Some((row, min_ratio)) => {
                    if ratio < min_ratio - self.tolerance
                        || (ratio <= min_ratio + self.tolerance && tableau.basic_vars[i] < tableau.basic_vars[row])
                    {
                        Some((i, ratio))
                    } else {
                        Some((row, min_ratio))
                    }
                }
            };
        }

        best.map(|(row, _)| row)
    }

    fn pivot(&self, tableau: &mut Tableau, row: usize, col: usize) {
        tracing::trace!(row, col, leaving = tableau.basic_vars[row], "pivot");

        let n_rows = tableau.data.len();
        let n_cols = tableau.n_cols();

        tableau.basic_vars[row] = col;

        let pivot_val = tableau.data[row][col];
        for j in 0..n_cols {
            tableau.data[row][j] /= pivot_val;
        }

        for i in 0..n_rows {
            if i != row {
                let factor = tableau.data[i][col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..n_cols {
                    tableau.data[i][j] -= factor * tableau.data[row][j];
                }
            }
        }
    }

    fn snap(&self, value: f64) -> f64 {
        if value.abs() < self.feasibility_tolerance { 0.0 } else { value }
    }

    fn extract_solution(&self, tableau: &Tableau, problem: &LpProblem) -> Solution {
        let n_vars = problem.num_variables();
        let rhs_col = tableau.n_cols() - 1;

        let mut values = vec![0.0; n_vars];
        for (i, &basic) in tableau.basic_vars.iter().enumerate() {
            if basic < n_vars {
                values[basic] = self.snap(tableau.data[i][rhs_col]);
            }
        }

        let objective_value = self.snap(
            problem
                .objective
                .coefficients
                .iter()
                .zip(&values)
                .map(|(c, v)| c * v)
                .sum(),
        );

        let analysis = self.analyze(tableau, problem, &values);

        Solution {
            status: SolutionStatus::Optimal,
            values,
            objective_value,
            analysis,
        }
    }

    fn analyze(&self, tableau: &Tableau, problem: &LpProblem, values: &[f64]) -> Analysis {
        let obj_row = tableau.n_constraints();
        let sense = if problem.objective.minimize { -1.0 } else { 1.0 };

        // For a column that started as s * e_i, its reduced cost is -s * y_i
        let constraints: Vec<ConstraintAnalysis> = problem
            .constraints
            .iter()
            .zip(&tableau.rows)
            .map(|(c, row)| {
                let dual = -tableau.data[obj_row][row.dual_col] / row.dual_sign;
                let flip = if row.flipped { -1.0 } else { 1.0 };
                let slack = self.snap(c.rhs - problem.lhs(c, values));
                ConstraintAnalysis {
                    constraint: c.name.clone(),
                    shadow_price: self.snap(sense * flip * dual),
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
                let is_basic = tableau.basic_vars.contains(&j);
                let rc = if is_basic { 0.0 } else { self.snap(sense * tableau.data[obj_row][j]) };
                ReducedCost {
                    variable: name.clone(),
                    value: values[j],
                    reduced_cost: rc,
                    is_basic,
                }
            })
            .collect();

        let binding_constraints = constraints
            .iter()
            .filter(|c| c.binding)
            .map(|c| c.constraint.clone())
            .collect();

        Analysis {
            constraints,
            reduced_costs,
            binding_constraints,
        }
    }
}

struct Tableau {
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    rows: Vec<RowInfo>,
    n_vars: usize,
    n_slack: usize,
    n_artificial: usize,
}

impl Tableau {
    fn n_constraints(&self) -> usize {
        self.data.len() - 1
    }

    fn n_cols(&self) -> usize {
        self.data[0].len()
    }

    fn artificial_start(&self) -> usize {
        self.n_vars + self.n_slack
    }
}

/// How a constraint row was laid into the tableau
struct RowInfo {
    flipped: bool,
    dual_col: usize,
    dual_sign: f64,
}

enum SimplexResult {
    Optimal,
    Unbounded,
    Infeasible,
    IterationLimit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::LpProblem;

    fn vars(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("x{}", i)).collect()
    }

    fn assert_close(actual: f64, expected: f64, what: &str) {
        assert!((actual - expected).abs() < 1e-6, "{} = {} (expected {})", what, actual, expected);
    }

    #[test]
    fn test_simple_maximization() {
        // Maximize: 3x + 2y
        // Subject to:
        //   x + y <= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=11
        let mut problem = LpProblem::new(vec!["x".to_string(), "y".to_string()]);
        problem.set_objective(vec![3.0, 2.0], false);
        problem.add_constraint("sum", vec![1.0, 1.0], ConstraintOp::Le, 4.0);
        problem.add_constraint("x_max", vec![1.0, 0.0], ConstraintOp::Le, 3.0);
        problem.add_constraint("y_max", vec![0.0, 1.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.values[0], 3.0, "x");
        assert_close(solution.values[1], 1.0, "y");
        assert_close(solution.objective_value, 11.0, "obj");

        // sum binds at price 2, x_max at 3 - 2 = 1, y_max has slack 2
        assert_close(solution.constraint("sum").unwrap().shadow_price, 2.0, "sum price");
        assert_close(solution.constraint("x_max").unwrap().shadow_price, 1.0, "x_max price");
        assert_close(solution.constraint("y_max").unwrap().slack, 2.0, "y_max slack");
        assert_eq!(solution.analysis.binding_constraints, vec!["sum", "x_max"]);
    }

    #[test]
    fn test_minimization_with_ge() {
        // Minimize: 2x + 3y
        // Subject to:
        //   x + y >= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=9
        let mut problem = LpProblem::new(vec!["x".to_string(), "y".to_string()]);
        problem.set_objective(vec![2.0, 3.0], true);
        problem.add_constraint("sum", vec![1.0, 1.0], ConstraintOp::Ge, 4.0);
        problem.add_constraint("x_max", vec![1.0, 0.0], ConstraintOp::Le, 3.0);
        problem.add_constraint("y_max", vec![0.0, 1.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.values[0], 3.0, "x");
        assert_close(solution.values[1], 1.0, "y");
        assert_close(solution.objective_value, 9.0, "obj");

        // Raising the requirement costs 3 per unit; loosening x_max saves 1
        assert_close(solution.constraint("sum").unwrap().shadow_price, 3.0, "sum price");
        assert_close(solution.constraint("x_max").unwrap().shadow_price, -1.0, "x_max price");
        assert_close(solution.constraint("y_max").unwrap().shadow_price, 0.0, "y_max price");
    }

    #[test]
    fn test_single_constraint_shadow_price() {
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![3.0, 2.0], false);
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Le, 4.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.values[0], 4.0, "x1");
        assert_close(solution.values[1], 0.0, "x2");
        assert_close(solution.objective_value, 12.0, "obj");
        let r0 = solution.constraint("R0").unwrap();
        assert_close(r0.shadow_price, 3.0, "R0 price");
        assert_close(r0.slack, 0.0, "R0 slack");
        assert!(r0.binding);

        let x2 = &solution.analysis.reduced_costs[1];
        assert!(!x2.is_basic);
        assert_close(x2.reduced_cost, -1.0, "x2 reduced cost");
    }

    #[test]
    fn test_two_binding_constraints() {
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![3.0, 2.0], false);
        problem.add_constraint("ModR0", vec![1.0, 1.0], ConstraintOp::Le, 10.0);
        problem.add_constraint("ModR1", vec![1.0, 0.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.values[0], 3.0, "x1");
        assert_close(solution.values[1], 7.0, "x2");
        assert_close(solution.objective_value, 23.0, "obj");
        assert_close(solution.constraint("ModR0").unwrap().shadow_price, 2.0, "ModR0 price");
        assert_close(solution.constraint("ModR1").unwrap().shadow_price, 1.0, "ModR1 price");
    }

    #[test]
    fn test_equality_constraint_dual() {
        // Maximize x1 + 2x2 subject to x1 + x2 == 3
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![1.0, 2.0], false);
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Eq, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.values[1], 3.0, "x2");
        assert_close(solution.objective_value, 6.0, "obj");
        assert_close(solution.constraint("R0").unwrap().shadow_price, 2.0, "R0 price");
        assert_close(solution.constraint("R0").unwrap().slack, 0.0, "R0 slack");
    }

    #[test]
    fn test_redundant_equalities() {
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![1.0, 1.0], true);
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Eq, 2.0);
        problem.add_constraint("R1", vec![2.0, 2.0], ConstraintOp::Eq, 4.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.objective_value, 2.0, "obj");
    }

    #[test]
    fn test_ge_with_negative_rhs_is_slack() {
        // x1 + x2 >= -1 is implied by nonnegativity
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![1.0, 1.0], true);
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Ge, -1.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.objective_value, 0.0, "obj");
        let r0 = solution.constraint("R0").unwrap();
        assert_close(r0.slack, -1.0, "R0 slack");
        assert_close(r0.shadow_price, 0.0, "R0 price");
    }

    #[test]
    fn test_infeasible() {
        // x >= 5
        // x <= 3
        let mut problem = LpProblem::new(vec!["x".to_string()]);
        problem.set_objective(vec![1.0], true);
        problem.add_constraint("lower", vec![1.0], ConstraintOp::Ge, 5.0);
        problem.add_constraint("upper", vec![1.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.values.is_empty());
    }

    #[test]
    fn test_negative_rhs_le_is_infeasible() {
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![1.0, 1.0], false);
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Le, -1.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Infeasible);
    }

    #[test]
    fn test_unbounded() {
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![1.0, 0.0], false);
        problem.add_constraint("R0", vec![0.0, 1.0], ConstraintOp::Le, 1.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Unbounded);
        assert!(solution.analysis.constraints.is_empty());
    }

    #[test]
    fn test_zero_objective_stays_at_origin() {
        for n in 2..=4 {
            let mut problem = LpProblem::new(vars(n));
            problem.set_objective(vec![0.0; n], false);
            problem.add_constraint("R0", vec![1.0; n], ConstraintOp::Le, 1.0);

            let solution = Solver::new().solve(&problem);

            assert_eq!(solution.status, SolutionStatus::Optimal);
            assert!(solution.values.iter().all(|&v| v == 0.0), "values = {:?}", solution.values);
            assert_eq!(solution.objective_value, 0.0);
        }
    }

    #[test]
    fn test_no_constraints() {
        let mut problem = LpProblem::new(vars(3));
        problem.set_objective(vec![1.0, 2.0, 3.0], true);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.values, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_malformed_problem() {
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![1.0, 1.0], false);
        problem.add_constraint("R0", vec![1.0, 1.0, 1.0], ConstraintOp::Le, 1.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Malformed);
    }

    #[test]
    fn test_iteration_limit() {
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![3.0, 2.0], false);
        problem.add_constraint("R0", vec![1.0, 1.0], ConstraintOp::Le, 4.0);

        let solution = Solver::new().with_max_iterations(0).solve(&problem);

        assert_eq!(solution.status, SolutionStatus::IterationLimit);
    }

    #[test]
    fn test_degenerate_problem_terminates() {
        // Several constraints meet at the optimum
        let mut problem = LpProblem::new(vars(2));
        problem.set_objective(vec![1.0, 1.0], false);
        problem.add_constraint("R0", vec![1.0, 0.0], ConstraintOp::Le, 1.0);
        problem.add_constraint("R1", vec![0.0, 1.0], ConstraintOp::Le, 1.0);
        problem.add_constraint("R2", vec![1.0, 1.0], ConstraintOp::Le, 2.0);
        problem.add_constraint("R3", vec![2.0, 1.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.objective_value, 2.0, "obj");
    }

    #[test]
    fn test_solve_is_deterministic() {
        let mut problem = LpProblem::new(vars(3));
        problem.set_objective(vec![2.0, 3.0, 1.0], false);
        problem.add_constraint("R0", vec![1.0, 1.0, 1.0], ConstraintOp::Le, 10.0);
        problem.add_constraint("R1", vec![1.0, 2.0, 0.0], ConstraintOp::Le, 12.0);
        problem.add_constraint("R2", vec![0.0, 1.0, 1.0], ConstraintOp::Ge, 2.0);

        let solver = Solver::new();
        assert_eq!(solver.solve(&problem), solver.solve(&problem));
    }
}
