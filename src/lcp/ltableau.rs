use itertools::Itertools;
use ndarray::{Array1, Array2, s};

use crate::linalg::{Bfs, Label, LinalgError, Pivotable, Tableau};

/// Result of running Lemke's algorithm on a general LCP.
#[derive(Debug, Clone, PartialEq)]
pub enum LemkeOutcome<T: Pivotable> {
    /// Values of `z`, labels `1..=n`.
    Solved(Bfs<T>),
    /// The path ended on a secondary ray: no solution was found.
    Ray,
}

/// Tableau driven by the complementary pivot rule.
///
/// Column 0 carries the artificial label. The complementary pairs are the structural label `k`
/// and the slack of row `k`.
#[derive(Debug, Clone)]
pub struct LTableau<T: Pivotable> {
    tableau: Tableau<T>,
}

impl<T: Pivotable> LTableau<T> {
    /// Builds the tableau of `A z - w = b`. Column 0 of `a` is the artificial column.
    pub fn new(a: &Array2<T>, b: &Array1<T>) -> Result<Self, LinalgError> {
        Ok(Self {
            tableau: Tableau::with_first_label(a, b, 0)?,
        })
    }

    /// Tableau of the LCP `w = q + M z`, `w, z >= 0`, `w'z = 0`, with the covering vector of
    /// ones in the artificial column.
    pub fn from_lcp(m: &Array2<T>, q: &Array1<T>) -> Result<Self, LinalgError> {
        let n = q.len();
        if m.dim() != (n, n) {
            return Err(LinalgError::DimensionMismatch {
                what: "LCP matrix",
                expected: n,
                found: if m.nrows() != n { m.nrows() } else { m.ncols() },
            });
        }
        let mut a = Array2::<T>::zeros((n, n + 1));
        a.column_mut(0).fill(T::one());
        a.slice_mut(s![.., 1..]).assign(m);
        let b = q.mapv(|v| -v);
        Self::new(&a, &b)
    }

    pub fn tableau(&self) -> &Tableau<T> {
        &self.tableau
    }

    /// At a complementary basic solution: no complementary pair is basic at the same time.
    pub fn is_complementary(&self) -> bool {
        self.tableau.basis().labels().iter().all(|label| {
            label.is_artificial() || !self.tableau.is_member(label.complement())
        })
    }

    /// Row that leaves the basis when `entering` enters.
    ///
    /// Candidates are the rows where the entering column is positive, resolved by the
    /// lexicographic minimum-ratio rule. When there is no candidate but the artificial label is
    /// basic in a row where the entering column vanishes, that row is returned.
    pub fn exit_index(&self, entering: Label) -> Result<usize, LinalgError> {
        let incol = self.tableau.solve_column(entering)?;
        let candidates: Vec<usize> = incol
            .iter()
            .positions(|v| v.is_strictly_positive())
            .collect();

        if candidates.is_empty() {
            return match self.tableau.basis().position(Label::ARTIFICIAL) {
                Some(row) if incol[row].is_negligible() => Ok(row),
                _ => Err(LinalgError::NoExitRow(entering.signed())),
            };
        }
        self.tableau
            .lex_exit_row(&incol, &candidates)
            .ok_or(LinalgError::NoExitRow(entering.signed()))
    }

    /// Pivots `entering` into the basis and returns the label that leaves.
    ///
    /// Returns the artificial label without pivoting when the exit row holds it with a zero
    /// entry.
    pub fn pivot_in(&mut self, entering: Label) -> Result<Label, LinalgError> {
        let row = self.exit_index(entering)?;
        if self.tableau.label(row).is_artificial()
            && self.tableau.solve_column(entering)?[row].is_negligible()
        {
            return Ok(Label::ARTIFICIAL);
        }
        self.tableau.pivot(row, entering)
    }

    /// Follows the complementary path that starts by dropping `start` until the complement of
    /// the label that left is `start` again, reaching the next complementary solution.
    pub fn lemke_path(&mut self, start: Label) -> Result<(), LinalgError> {
        if start.is_artificial() || !self.tableau.basis().is_valid(start) {
            return Err(LinalgError::BadLabel(start.signed()));
        }
        if !self.is_complementary() {
            return Err(LinalgError::NotComplementary);
        }

        let mut entering = if self.tableau.is_member(start) {
            -start
        } else {
            start
        };
        let mut steps = 0;
        loop {
            let leaving = self.pivot_in(entering)?;
            steps += 1;
            if leaving == start || leaving == -start || leaving.is_artificial() {
                break;
            }
            entering = -leaving;
        }
        log::debug!("lemke path from {start} finished after {steps} pivots");
        Ok(())
    }

    /// Lemke's algorithm with the covering vector in the artificial column.
    pub fn lemke(&mut self) -> Result<LemkeOutcome<T>, LinalgError> {
        let values = self.tableau.basis_vector();
        let infeasible: Vec<usize> = values
            .iter()
            .positions(|v| v.is_strictly_negative())
            .collect();
        if infeasible.is_empty() {
            return Ok(LemkeOutcome::Solved(self.bfs()));
        }

        // The artificial enters on the most negative row, ties broken lexicographically.
        let cover = self.tableau.solve_column(Label::ARTIFICIAL)?.mapv(|v| -v);
        let row = self
            .tableau
            .lex_exit_row(&cover, &infeasible)
            .ok_or(LinalgError::NoExitRow(0))?;
        let mut entering = -self.tableau.pivot(row, Label::ARTIFICIAL)?;

        loop {
            let leaving = match self.pivot_in(entering) {
                Err(LinalgError::NoExitRow(_)) => return Ok(LemkeOutcome::Ray),
                result => result?,
            };
            if leaving.is_artificial() {
                let stuck = self
                    .tableau
                    .basic_value(Label::ARTIFICIAL)
                    .is_ok_and(|v| !v.is_negligible());
                if stuck {
                    return Ok(LemkeOutcome::Ray);
                }
                log::debug!("lemke solved the LCP in {} pivots", self.tableau.pivots());
                return Ok(LemkeOutcome::Solved(self.bfs()));
            }
            entering = -leaving;
        }
    }

    /// Basic solution restricted to the structural labels other than the artificial one.
    pub fn bfs(&self) -> Bfs<T> {
        self.tableau
            .bfs()
            .iter()
            .filter(|(label, _)| !label.is_artificial())
            .map(|(label, value)| (*label, value.clone()))
            .collect()
    }
}

/// Solves `w = q + M z`, `w, z >= 0`, `w'z = 0` with Lemke's algorithm.
pub fn solve_lcp<T: Pivotable>(
    m: &Array2<T>,
    q: &Array1<T>,
) -> Result<LemkeOutcome<T>, LinalgError> {
    LTableau::from_lcp(m, q)?.lemke()
}
