/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Optimal values for each variable (empty unless optimal)
    pub values: Vec<f64>,
    /// Optimal objective value
    pub objective_value: f64,
    /// Sensitivity data (empty unless optimal)
    pub analysis: Analysis,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
    /// The iteration limit was hit before the simplex settled
    IterationLimit,
    /// The problem failed validation and was never solved
    Malformed,
    /// The engine stopped without a verdict (numerical trouble, no progress)
    Failed,
}

/// Sensitivity information at the optimum
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Dual value and slack for each constraint, in constraint order
    pub constraints: Vec<ConstraintAnalysis>,

    /// Reduced costs for each variable
    /// For non-basic variables, indicates how much the objective coefficient must change to enter the basis
    pub reduced_costs: Vec<ReducedCost>,

    /// Which constraints are binding (tight) at optimum
    pub binding_constraints: Vec<String>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintAnalysis {
    /// Constraint name
    pub constraint: String,
    /// Change in the optimal objective per unit increase of the right-hand side
    pub shadow_price: f64,
    /// Right-hand side minus left-hand side at the optimum
    pub slack: f64,
    /// Whether the constraint holds with equality
    pub binding: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedCost {
    /// Variable name
    pub variable: String,
    /// Current value in solution
    pub value: f64,
    /// Reduced cost
    pub reduced_cost: f64,
    /// Is this variable in the basis?
    pub is_basic: bool,
}

impl Solution {
    fn without_values(status: SolutionStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: f64::NAN,
            analysis: Analysis::empty(),
        }
    }

    pub fn infeasible() -> Self {
        Self::without_values(SolutionStatus::Infeasible)
    }

    pub fn unbounded() -> Self {
        Self::without_values(SolutionStatus::Unbounded)
    }

    pub fn iteration_limit() -> Self {
        Self::without_values(SolutionStatus::IterationLimit)
    }

    pub fn malformed() -> Self {
        Self::without_values(SolutionStatus::Malformed)
    }

    pub fn failed() -> Self {
        Self::without_values(SolutionStatus::Failed)
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Look up the analysis row for a named constraint
    pub fn constraint(&self, name: &str) -> Option<&ConstraintAnalysis> {
        self.analysis.constraints.iter().find(|c| c.constraint == name)
    }
}

impl Analysis {
    pub fn empty() -> Self {
        Self::default()
    }
}
