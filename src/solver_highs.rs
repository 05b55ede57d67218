//! [`SolverApi`] backed by `good_lp` with the HiGHS engine (§4.7). This is
//! the only module where a third-party solver's concrete types leak in;
//! `master` and `pricing` only ever see the trait.
//!
//! The crate buffers variables, constraints and the objective as it is
//! built, then assembles and solves the actual `good_lp` problem inside
//! `solve()` — `good_lp`'s builder requires the objective before
//! constraints can be added, while the trait in `solver_api` (mirroring
//! the master/pricing build order) adds constraints before the objective
//! is finalized.

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, Expression, ProblemVariables, Solution as GoodLpSolution, SolverModel, Variable};

use crate::solver_api::{ConstraintId, Sense, SolverApi, Status, VarId};

#[derive(Clone, Copy)]
enum VarKind {
    Continuous(f64, f64),
    Binary,
}

struct ConstraintSpec {
    terms: Vec<(VarId, f64)>,
    sense: Sense,
    rhs: f64,
}

#[derive(Default)]
pub struct HighsSolver {
    kinds: Vec<VarKind>,
    constraints: Vec<ConstraintSpec>,
    objective: Vec<(VarId, f64)>,

    values: Vec<f64>,
    duals: Vec<f64>,
    objective_value: f64,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn expression(&self, handles: &[Variable], terms: &[(VarId, f64)]) -> Expression {
        let mut expr = Expression::from(0.0);
        for &(var, coeff) in terms {
            expr += handles[var.0] * coeff;
        }
        expr
    }
}

impl SolverApi for HighsSolver {
    fn add_continuous_var(&mut self, lower: f64, upper: f64, _name: &str) -> VarId {
        let id = VarId(self.kinds.len());
        self.kinds.push(VarKind::Continuous(lower, upper));
        id
    }

    fn add_binary_var(&mut self, _name: &str) -> VarId {
        let id = VarId(self.kinds.len());
        self.kinds.push(VarKind::Binary);
        id
    }

    fn add_constraint(&mut self, terms: &[(VarId, f64)], sense: Sense, rhs: f64) -> ConstraintId {
        let id = ConstraintId(self.constraints.len());
        self.constraints.push(ConstraintSpec {
            terms: terms.to_vec(),
            sense,
            rhs,
        });
        id
    }

    fn set_objective(&mut self, terms: &[(VarId, f64)]) {
        self.objective = terms.to_vec();
    }

    fn solve(&mut self, time_limit: Option<f64>, gap: Option<f64>) -> Status {
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = self
            .kinds
            .iter()
            .map(|kind| match *kind {
                VarKind::Continuous(lower, upper) => vars.add(variable().min(lower).max(upper)),
                VarKind::Binary => vars.add(variable().binary()),
            })
            .collect();

        let objective = self.expression(&handles, &self.objective);

        let mut problem = vars.minimise(objective.clone()).using(highs);
        if let Some(limit) = time_limit {
            problem = problem.set_time_limit(limit.max(0.0));
        }
        if let Some(gap) = gap {
            problem = problem.set_mip_gap(gap.max(0.0));
        }

        let mut constraint_refs = Vec::with_capacity(self.constraints.len());
        for spec in &self.constraints {
            let expr = self.expression(&handles, &spec.terms);
            let reference = match spec.sense {
                Sense::LessOrEqual => problem.add_constraint(constraint!(expr <= spec.rhs)),
                Sense::GreaterOrEqual => problem.add_constraint(constraint!(expr >= spec.rhs)),
                Sense::Equal => problem.add_constraint(constraint!(expr == spec.rhs)),
            };
            constraint_refs.push(reference);
        }

        match problem.solve() {
            Ok(solution) => {
                self.values = handles.iter().map(|&v| solution.value(v)).collect();
                self.duals = constraint_refs.iter().map(|&c| solution.dual(c)).collect();
                self.objective_value = solution.eval(&objective);
                Status::Optimal
            }
            Err(good_lp::ResolutionError::Infeasible) => {
                self.values = vec![0.0; handles.len()];
                self.duals = vec![0.0; constraint_refs.len()];
                self.objective_value = 0.0;
                Status::Infeasible
            }
            Err(_) => {
                // good_lp's HiGHS backend reports "reached the time limit
                // without proving optimality" the same way as a genuine
                // solver failure: an opaque `Err` with no solution to
                // extract. This is indistinguishable at this layer, so it
                // is surfaced as `Abnormal`; callers that always attach a
                // time limit/gap (pricing, the final IP) treat `Abnormal`
                // as a recoverable "no solution found in budget" outcome
                // rather than a fatal error, per their own policy.
                self.values = vec![0.0; handles.len()];
                self.duals = vec![0.0; constraint_refs.len()];
                self.objective_value = 0.0;
                Status::Abnormal
            }
        }
    }

    fn value(&self, var: VarId) -> f64 {
        self.values[var.0]
    }

    fn dual_value(&self, constraint: ConstraintId) -> f64 {
        self.duals[constraint.0]
    }

    fn objective_value(&self) -> f64 {
        self.objective_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_cover_lp_has_unit_dual() {
        // One covering constraint, one variable: min z s.t. z >= 1, z in [0,1].
        let mut solver = HighsSolver::new();
        let z = solver.add_continuous_var(0.0, 1.0, "z");
        let c = solver.add_constraint(&[(z, 1.0)], Sense::GreaterOrEqual, 1.0);
        solver.set_objective(&[(z, 3.0)]);

        let status = solver.solve(None, None);
        assert_eq!(status, Status::Optimal);
        assert!((solver.value(z) - 1.0).abs() < 1e-6);
        assert!((solver.objective_value() - 3.0).abs() < 1e-6);
        assert!((solver.dual_value(c) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn binary_knapsack_picks_the_cheaper_item() {
        let mut solver = HighsSolver::new();
        let a = solver.add_binary_var("a");
        let b = solver.add_binary_var("b");
        solver.add_constraint(&[(a, 1.0), (b, 1.0)], Sense::LessOrEqual, 1.0);
        solver.add_constraint(&[(a, 1.0), (b, 1.0)], Sense::GreaterOrEqual, 1.0);
        solver.set_objective(&[(a, 5.0), (b, 2.0)]);

        let status = solver.solve(Some(1.0), Some(0.0));
        assert_eq!(status, Status::Optimal);
        assert!(solver.value(b) > 0.5);
        assert!(solver.value(a) < 0.5);
    }
}
