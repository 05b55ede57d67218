//! Time-window compatibility matrix (§4.2): precomputed pairwise slack used
//! by the constructor for seed selection and as a fast reject filter.

use crate::instance::{Instance, NodeIdx};
use crate::utils::Matrix;

/// `TW[i,j]` is the slack remaining if `i` is served immediately before
/// `j`, or `-infinity` (via [`TwMatrix::NEG_INF`]) if that order is
/// impossible on time-window grounds alone. `TW[i,i]` is the sentinel `-1`
/// and is never read.
pub struct TwMatrix {
    matrix: Matrix<f64>,
    n: usize,
}

impl TwMatrix {
    pub const NEG_INF: f64 = f64::NEG_INFINITY;

    pub fn build(instance: &Instance) -> Self {
        let n = instance.n();
        let mut matrix = Matrix::filled(0.0, n, n);

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    matrix.set(i, j, -1.0);
                    continue;
                }
                let node_i = instance.node(i);
                let node_j = instance.node(j);
                let travel = instance.arc(i, j).travel_time;

                let ae_j = node_i.open + node_i.service_time + travel;
                let al_j = node_j.close + travel;
                let e_j = node_j.open;
                let l_j = node_j.close - node_j.service_time;

                let value = if l_j - ae_j > 0.0 {
                    l_j.min(al_j) - e_j.max(ae_j)
                } else {
                    Self::NEG_INF
                };
                matrix.set(i, j, value);
            }
        }

        Self { matrix, n }
    }

    #[inline]
    pub fn get(&self, i: NodeIdx, j: NodeIdx) -> f64 {
        self.matrix.get(i, j)
    }

    #[inline]
    pub fn is_finite(&self, i: NodeIdx, j: NodeIdx) -> bool {
        self.get(i, j).is_finite()
    }

    /// The maximum finite entry in the matrix, used to derive `big` for
    /// `seed_value` (§4.3): `big = 100 * max finite TW`.
    pub fn max_finite(&self) -> f64 {
        let mut max = f64::MIN;
        for i in 0..self.n {
            for j in 0..self.n {
                if i == j {
                    continue;
                }
                let value = self.get(i, j);
                if value.is_finite() && value > max {
                    max = value;
                }
            }
        }
        if max == f64::MIN {
            0.0
        } else {
            max
        }
    }

    /// Substitutes `-big` for `-infinity` entries, per the numeric-care
    /// guidance in §9: never mingle the sentinel with `seed_value` arithmetic.
    pub fn finite_or(&self, i: NodeIdx, j: NodeIdx, big: f64) -> f64 {
        let value = self.get(i, j);
        if value.is_finite() {
            value
        } else {
            -big
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::fixtures::toy_instance;

    #[test]
    fn diagonal_is_sentinel() {
        let instance = toy_instance();
        let tw = TwMatrix::build(&instance);
        for i in 0..instance.n() {
            assert_eq!(tw.get(i, i), -1.0);
        }
    }

    #[test]
    fn off_diagonal_entries_are_finite_for_toy_instance() {
        let instance = toy_instance();
        let tw = TwMatrix::build(&instance);
        assert!(tw.is_finite(0, 1));
        assert!(tw.is_finite(0, 2));
    }
}
