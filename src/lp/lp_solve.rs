use ndarray::{Array1, Array2};

use crate::linalg::{Bfs, LinalgError, Pivotable};

use super::{LpTableau, PhaseOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpStatus {
    Optimal,
    Infeasible,
    Unbounded,
}

/// Two-phase simplex solution of `max c.x` subject to `A x >= b`, `x >= 0`, where the last
/// `num_equalities` rows hold with equality.
///
/// The problem is solved on construction. Phase 1 maximises minus the sum of the artificial
/// columns to reach a feasible basis, phase 2 the objective itself. Both leave on the
/// lexicographic ratio rule, so degenerate programs cannot cycle.
#[derive(Debug, Clone)]
pub struct LpSolve<T: Pivotable> {
    lp: LpTableau<T>,
    status: LpStatus,
    phase1_pivots: usize,
}

impl<T: Pivotable> LpSolve<T> {
    pub fn new(
        a: &Array2<T>,
        b: &Array1<T>,
        c: &Array1<T>,
        num_equalities: usize,
    ) -> Result<Self, LinalgError> {
        if c.len() != a.ncols() {
            return Err(LinalgError::DimensionMismatch {
                what: "objective",
                expected: a.ncols(),
                found: c.len(),
            });
        }
        let mut lp = LpTableau::new(a, b, num_equalities)?;

        let num_vars = lp.num_vars();
        let phase1_costs = (0..num_vars + lp.num_artificial())
            .map(|k| if k < num_vars { T::zero() } else { -T::one() })
            .collect();
        lp.set_costs(phase1_costs)?;
        // The artificial objective is bounded above by zero.
        lp.optimize()?;
        let phase1_pivots = lp.pivots();
        log::debug!(
            "phase 1 finished after {phase1_pivots} pivots at {:?}",
            lp.objective_value()
        );

        if lp.artificial_is_positive() {
            return Ok(Self {
                lp,
                status: LpStatus::Infeasible,
                phase1_pivots,
            });
        }
        lp.remove_artificials()?;
        let phase1_pivots = lp.pivots();

        let phase2_costs = c
            .iter()
            .cloned()
            .chain(std::iter::repeat_n(T::zero(), lp.num_artificial()))
            .collect();
        lp.set_costs(phase2_costs)?;
        let status = match lp.optimize()? {
            PhaseOutcome::Optimal => LpStatus::Optimal,
            PhaseOutcome::Unbounded(label) => {
                log::debug!("objective unbounded along {label}");
                LpStatus::Unbounded
            }
        };
        log::debug!("phase 2 finished after {} pivots", lp.pivots() - phase1_pivots);

        Ok(Self {
            lp,
            status,
            phase1_pivots,
        })
    }

    pub fn status(&self) -> LpStatus {
        self.status
    }

    pub fn is_feasible(&self) -> bool {
        self.status != LpStatus::Infeasible
    }

    /// Feasible and bounded. An infeasible program is not known to be bounded.
    pub fn is_bounded(&self) -> bool {
        self.status == LpStatus::Optimal
    }

    /// Nonzero variables of the optimal basic solution.
    pub fn optimum_bfs(&self) -> Option<Bfs<T>> {
        self.is_bounded().then(|| self.lp.primal_bfs())
    }

    /// Every variable of the optimal basic solution.
    pub fn optimum(&self) -> Option<Array1<T>> {
        self.is_bounded().then(|| self.lp.primal())
    }

    pub fn optimum_value(&self) -> Option<T> {
        self.is_bounded().then(|| self.lp.objective_value())
    }

    /// Shadow prices of the rows at the optimum. Those of inequality rows are nonpositive and
    /// `b.u` equals the optimal value.
    pub fn dual_values(&self) -> Option<Result<Array1<T>, LinalgError>> {
        self.is_bounded().then(|| self.lp.dual_values())
    }

    /// Pivots up to the feasible basis, installing the artificial columns included.
    pub fn phase1_pivots(&self) -> usize {
        self.phase1_pivots
    }

    pub fn phase2_pivots(&self) -> usize {
        self.lp.pivots() - self.phase1_pivots
    }

    pub fn total_pivots(&self) -> usize {
        self.lp.pivots()
    }

    pub fn lp_tableau(&self) -> &LpTableau<T> {
        &self.lp
    }
}
