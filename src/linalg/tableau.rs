use ndarray::{Array1, Array2, Axis, s};

use super::{Basis, Bfs, Label, LinalgError, Pivotable};

/// Row-reduced representation of `A z - w = b` relative to a basis.
///
/// The slack `w_i` of row `i` has the implicit column `-e_i`. The working matrix holds
/// `denom * B^-1 [A | -I | b]`, so the basic columns always read as the identity and the last
/// column is the basic solution. `data` keeps the original system for refactoring.
#[derive(Debug, Clone)]
pub struct Tableau<T: Pivotable> {
    data: Array2<T::Entry>,
    work: Array2<T::Entry>,
    denom: T::Entry,
    basis: Basis,
    reference: Vec<Label>,
    pivots: usize,
    pivots_since_refactor: usize,
}

impl<T: Pivotable> Tableau<T> {
    /// Tableau whose structural labels are `1..=a.ncols()`.
    pub fn new(a: &Array2<T>, b: &Array1<T>) -> Result<Self, LinalgError> {
        Self::with_first_label(a, b, 1)
    }

    /// Tableau whose column `j` of `a` carries the structural label `first_label + j`. A first
    /// label of 0 makes column 0 the artificial column.
    pub fn with_first_label(
        a: &Array2<T>,
        b: &Array1<T>,
        first_label: usize,
    ) -> Result<Self, LinalgError> {
        let (rows, cols) = a.dim();
        if b.len() != rows {
            return Err(LinalgError::DimensionMismatch {
                what: "right-hand side",
                expected: rows,
                found: b.len(),
            });
        }
        if cols == 0 {
            return Err(LinalgError::DimensionMismatch {
                what: "constraint columns",
                expected: 1,
                found: 0,
            });
        }

        let mut system = Array2::<T>::zeros((rows, cols + rows + 1));
        system.slice_mut(s![.., ..cols]).assign(a);
        for i in 0..rows {
            system[[i, cols + i]] = -T::one();
        }
        system.column_mut(cols + rows).assign(b);

        let data = T::to_entries(&system);
        let basis = Basis::new(first_label, first_label + cols - 1, rows);
        let mut tableau = Self {
            work: data.clone(),
            data,
            denom: T::unit_entry(),
            reference: basis.labels().to_vec(),
            basis,
            pivots: 0,
            pivots_since_refactor: 0,
        };
        tableau.refactor()?;
        Ok(tableau)
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn num_rows(&self) -> usize {
        self.basis.num_rows()
    }

    pub fn label(&self, row: usize) -> Label {
        self.basis.label(row)
    }

    pub fn find(&self, label: Label) -> Result<usize, LinalgError> {
        self.basis.find(label)
    }

    pub fn is_member(&self, label: Label) -> bool {
        self.basis.is_member(label)
    }

    pub fn mark(&mut self, label: Label) {
        self.basis.mark(label);
    }

    pub fn unmark(&mut self, label: Label) {
        self.basis.unmark(label);
    }

    pub fn is_blocked(&self, label: Label) -> bool {
        self.basis.is_blocked(label)
    }

    /// Total number of pivots applied since construction.
    pub fn pivots(&self) -> usize {
        self.pivots
    }

    fn column_index(&self, label: Label) -> Result<usize, LinalgError> {
        if self.basis.is_structural_label(label) {
            Ok(label.index() - self.basis.first_label())
        } else if self.basis.is_slack_label(label) {
            Ok(self.basis.num_structural() + label.index() - 1)
        } else {
            Err(LinalgError::BadLabel(label.signed()))
        }
    }

    fn rhs_index(&self) -> usize {
        self.basis.num_structural() + self.basis.num_rows()
    }

    fn column_values(&self, col: usize) -> Array1<T> {
        self.work.column(col).map(|e| T::value(e, &self.denom))
    }

    /// Replaces the label basic in `row` by `entering` and returns the label that leaves.
    ///
    /// Fails without touching the tableau when the pivot element is zero.
    pub fn pivot(&mut self, row: usize, entering: Label) -> Result<Label, LinalgError> {
        if row >= self.num_rows() {
            return Err(LinalgError::BadRow(row));
        }
        let col = self.column_index(entering)?;
        if self.basis.label(row) == entering {
            return Ok(entering);
        }
        if self.basis.is_member(entering) {
            return Err(LinalgError::BadLabel(entering.signed()));
        }
        if T::entry_is_zero(&self.work[[row, col]]) {
            return Err(LinalgError::SingularPivot {
                row,
                label: entering.signed(),
            });
        }

        T::pivot_entries(&mut self.work, &mut self.denom, row, col);
        let leaving = self.basis.pivot(row, entering)?;
        self.pivots += 1;
        self.pivots_since_refactor += 1;
        log::trace!("pivot row {row}: {leaving} leaves, {entering} enters");

        if let Some(interval) = T::REFACTOR_INTERVAL {
            if self.pivots_since_refactor >= interval {
                self.refactor()?;
            }
        }
        Ok(leaving)
    }

    /// Coordinates of the column of `label` in the current basis, `B^-1 a`.
    pub fn solve_column(&self, label: Label) -> Result<Array1<T>, LinalgError> {
        let col = self.column_index(label)?;
        Ok(self.column_values(col))
    }

    /// Current basic solution, `B^-1 b`, indexed by row.
    pub fn basis_vector(&self) -> Array1<T> {
        self.column_values(self.rhs_index())
    }

    pub fn basic_value(&self, label: Label) -> Result<T, LinalgError> {
        let row = self.basis.find(label)?;
        Ok(T::value(&self.work[[row, self.rhs_index()]], &self.denom))
    }

    /// Rebuilds the working matrix from the original system for the current basis.
    ///
    /// The basic columns are eliminated one at a time, each on the row with the largest pivot
    /// among those not yet used, and the rows are then put back in basis order.
    pub fn refactor(&mut self) -> Result<(), LinalgError> {
        let rows = self.num_rows();
        let mut work = self.data.clone();
        let mut denom = T::unit_entry();
        let mut used = vec![false; rows];
        let mut order = vec![0; rows];

        for (basis_row, label) in self.basis.labels().iter().enumerate() {
            let col = self.column_index(*label)?;
            let row = (0..rows)
                .filter(|r| !used[*r] && !T::entry_is_zero(&work[[*r, col]]))
                .max_by(|a, b| T::entry_magnitude_cmp(&work[[*a, col]], &work[[*b, col]]))
                .ok_or(LinalgError::SingularPivot {
                    row: basis_row,
                    label: label.signed(),
                })?;
            T::pivot_entries(&mut work, &mut denom, row, col);
            used[row] = true;
            order[basis_row] = row;
        }

        self.work = work.select(Axis(0), &order);
        self.denom = denom;
        self.pivots_since_refactor = 0;
        Ok(())
    }

    /// Every basic value is nonnegative.
    pub fn is_feasible(&self) -> bool {
        self.basis_vector().iter().all(|v| !v.is_strictly_negative())
    }

    /// Nonzero values of the basic structural labels.
    pub fn bfs(&self) -> Bfs<T> {
        let solution = self.basis_vector();
        self.basis
            .labels()
            .iter()
            .zip(solution)
            .filter(|(label, value)| label.is_structural() && !value.is_negligible())
            .map(|(label, value)| (*label, value))
            .collect()
    }

    /// Anchors the lexicographic tie-break at the current basis.
    pub fn set_lex_reference(&mut self) {
        self.reference = self.basis.labels().to_vec();
    }

    /// Lexicographic minimum-ratio test over the candidate rows, those where `incol` is
    /// positive.
    ///
    /// Ratios are taken against the basic solution and then, while ties remain, against the
    /// columns of `B^-1 B_0` where `B_0` is the reference basis. Non-minimal rows are dropped at
    /// every stage. Rows of `B^-1 B_0` are linearly independent, so a single row always remains.
    pub fn lex_exit_row(&self, incol: &Array1<T>, candidates: &[usize]) -> Option<usize> {
        let mut best = candidates.to_vec();
        let mut stage = 0;
        while best.len() > 1 && stage <= self.num_rows() {
            let column = if stage == 0 {
                self.basis_vector()
            } else {
                let label = self.reference[stage - 1];
                self.solve_column(label).ok()?
            };
            let ratio = |row: usize| column[row].clone() / incol[row].clone();
            let min = best
                .iter()
                .map(|row| ratio(*row))
                .reduce(|a, b| if b < a { b } else { a })?;
            best.retain(|row| !min.definitely_less(&ratio(*row)));
            stage += 1;
        }
        best.first().copied()
    }
}
