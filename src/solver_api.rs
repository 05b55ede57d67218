//! The narrow solver capability set (§4.7). This is the only place in the
//! crate where third-party/engine-specific solver semantics are meant to
//! leak in; the master and pricing modules only ever see this trait.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Optimal,
    FeasibleButSuboptimal,
    Infeasible,
    Abnormal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

/// Minimal capability set a mixed-integer/linear solver must expose for
/// this crate to build the master and pricing models on top of it.
pub trait SolverApi {
    fn add_continuous_var(&mut self, lower: f64, upper: f64, name: &str) -> VarId;
    fn add_binary_var(&mut self, name: &str) -> VarId;

    /// Adds `sum(coeffs[k] * vars[k]) <sense> rhs`.
    fn add_constraint(&mut self, terms: &[(VarId, f64)], sense: Sense, rhs: f64) -> ConstraintId;

    /// Replaces the objective with `sum(coeffs[k] * vars[k])`, minimized.
    fn set_objective(&mut self, terms: &[(VarId, f64)]);

    fn solve(&mut self, time_limit: Option<f64>, gap: Option<f64>) -> Status;

    fn value(&self, var: VarId) -> f64;

    /// LP dual value of a constraint. Only meaningful after an LP solve.
    fn dual_value(&self, constraint: ConstraintId) -> f64;

    fn objective_value(&self) -> f64;
}
