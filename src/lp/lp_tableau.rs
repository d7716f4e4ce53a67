use itertools::Itertools;
use ndarray::{Array1, Array2, s};

use crate::linalg::{Bfs, Label, LinalgError, Pivotable, Tableau};

/// Result of optimising the current objective from a feasible basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    Optimal,
    /// The entering label has no exit row.
    Unbounded(Label),
}

/// Tableau of `A x - w = b` extended with one artificial column per row whose slack cannot start
/// basic: inequality rows with a positive right-hand side and every equality row.
///
/// Structural labels `1..=num_vars` are the variables of the program and the following ones the
/// artificial columns. Slacks of equality rows are blocked for good. The objective is a cost per
/// structural label, to be maximised.
#[derive(Debug, Clone)]
pub struct LpTableau<T: Pivotable> {
    tableau: Tableau<T>,
    num_vars: usize,
    costs: Array1<T>,
}

impl<T: Pivotable> LpTableau<T> {
    /// Builds the tableau and installs the artificial columns, leaving a feasible basis. The last
    /// `num_equalities` rows are equalities.
    pub fn new(a: &Array2<T>, b: &Array1<T>, num_equalities: usize) -> Result<Self, LinalgError> {
        let (rows, num_vars) = a.dim();
        if num_equalities > rows {
            return Err(LinalgError::DimensionMismatch {
                what: "equality rows",
                expected: rows,
                found: num_equalities,
            });
        }
        if b.len() != rows {
            return Err(LinalgError::DimensionMismatch {
                what: "right-hand side",
                expected: rows,
                found: b.len(),
            });
        }

        let first_equality = rows - num_equalities;
        let artificial_rows: Vec<usize> = (0..rows)
            .filter(|i| *i >= first_equality || b[*i].is_strictly_positive())
            .collect();

        let mut extended = Array2::<T>::zeros((rows, num_vars + artificial_rows.len()));
        extended.slice_mut(s![.., ..num_vars]).assign(a);
        for (k, row) in artificial_rows.iter().enumerate() {
            extended[[*row, num_vars + k]] = if b[*row].is_negative() {
                -T::one()
            } else {
                T::one()
            };
        }

        let mut tableau = Tableau::new(&extended, b)?;
        for (k, row) in artificial_rows.iter().enumerate() {
            tableau.pivot(*row, Label::Structural(num_vars + k + 1))?;
        }
        for row in first_equality..rows {
            tableau.mark(Label::Slack(row + 1));
        }

        Ok(Self {
            costs: Array1::zeros(num_vars + artificial_rows.len()),
            tableau,
            num_vars,
        })
    }

    pub fn tableau(&self) -> &Tableau<T> {
        &self.tableau
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_artificial(&self) -> usize {
        self.costs.len() - self.num_vars
    }

    pub fn is_artificial(&self, label: Label) -> bool {
        matches!(label, Label::Structural(k) if k > self.num_vars)
    }

    pub fn artificial_labels(&self) -> impl Iterator<Item = Label> + '_ {
        (self.num_vars + 1..=self.costs.len()).map(Label::Structural)
    }

    /// Replaces the objective. `costs` covers every structural label, artificial ones included.
    pub fn set_costs(&mut self, costs: Array1<T>) -> Result<(), LinalgError> {
        if costs.len() != self.costs.len() {
            return Err(LinalgError::DimensionMismatch {
                what: "objective",
                expected: self.costs.len(),
                found: costs.len(),
            });
        }
        self.costs = costs;
        Ok(())
    }

    /// Cost of a label, zero for slacks.
    pub fn cost(&self, label: Label) -> T {
        match label {
            Label::Structural(k) if k >= 1 && k <= self.costs.len() => self.costs[k - 1].clone(),
            _ => T::zero(),
        }
    }

    fn basic_costs(&self) -> Array1<T> {
        self.tableau
            .basis()
            .labels()
            .iter()
            .map(|label| self.cost(*label))
            .collect()
    }

    /// `c_B B^-1 a_j - c_j`; the objective improves when a label with a negative reduced cost
    /// enters.
    pub fn reduced_cost(&self, label: Label) -> Result<T, LinalgError> {
        let column = self.tableau.solve_column(label)?;
        Ok(dot(&self.basic_costs(), &column) - self.cost(label))
    }

    /// Nonbasic unblocked label with the most negative reduced cost, `None` at an optimum.
    pub fn entering_label(&self) -> Result<Option<Label>, LinalgError> {
        let mut best: Option<(Label, T)> = None;
        for label in self.tableau.basis().all_labels() {
            if self.tableau.is_member(label) || self.tableau.is_blocked(label) {
                continue;
            }
            let reduced = self.reduced_cost(label)?;
            let improves = match &best {
                Some((_, current)) => reduced.definitely_less(current),
                None => reduced.is_strictly_negative(),
            };
            if improves {
                best = Some((label, reduced));
            }
        }
        Ok(best.map(|(label, _)| label))
    }

    /// Runs simplex pivots from the current feasible basis until the objective cannot improve.
    pub fn optimize(&mut self) -> Result<PhaseOutcome, LinalgError> {
        self.tableau.set_lex_reference();
        while let Some(entering) = self.entering_label()? {
            let incol = self.tableau.solve_column(entering)?;
            let candidates: Vec<usize> = incol
                .iter()
                .positions(|v| v.is_strictly_positive())
                .collect();
            let Some(row) = self.tableau.lex_exit_row(&incol, &candidates) else {
                return Ok(PhaseOutcome::Unbounded(entering));
            };
            self.tableau.pivot(row, entering)?;
        }
        Ok(PhaseOutcome::Optimal)
    }

    pub fn objective_value(&self) -> T {
        dot(&self.basic_costs(), &self.tableau.basis_vector())
    }

    /// Some artificial label is basic at a positive level.
    pub fn artificial_is_positive(&self) -> bool {
        self.artificial_labels().any(|label| {
            self.tableau
                .basic_value(label)
                .is_ok_and(|v| v.is_strictly_positive())
        })
    }

    /// Blocks the artificial columns and pivots the basic ones, all at level zero, out of the
    /// basis where some other label can take their row. The rows where none can are redundant.
    pub fn remove_artificials(&mut self) -> Result<(), LinalgError> {
        let artificial: Vec<Label> = self.artificial_labels().collect();
        for label in &artificial {
            self.tableau.mark(*label);
        }
        for label in artificial {
            let Some(row) = self.tableau.basis().position(label) else {
                continue;
            };
            let replacement = self.tableau.basis().all_labels().find(|candidate| {
                !self.tableau.is_member(*candidate)
                    && !self.tableau.is_blocked(*candidate)
                    && self
                        .tableau
                        .solve_column(*candidate)
                        .is_ok_and(|column| !column[row].is_negligible())
            });
            match replacement {
                Some(entering) => {
                    self.tableau.pivot(row, entering)?;
                }
                None => log::debug!("row {row} is redundant, {label} stays basic at zero"),
            }
        }
        Ok(())
    }

    /// Values of the variables of the program.
    pub fn primal(&self) -> Array1<T> {
        let bfs = self.primal_bfs();
        (1..=self.num_vars)
            .map(|k| bfs.get(Label::Structural(k)))
            .collect()
    }

    pub fn primal_bfs(&self) -> Bfs<T> {
        self.tableau
            .bfs()
            .iter()
            .filter(|(label, _)| !self.is_artificial(**label))
            .map(|(label, value)| (*label, value.clone()))
            .collect()
    }

    /// Shadow prices `u = c_B B^-1` of the rows.
    pub fn dual_values(&self) -> Result<Array1<T>, LinalgError> {
        let costs = self.basic_costs();
        (1..=self.tableau.num_rows())
            .map(|k| {
                let column = self.tableau.solve_column(Label::Slack(k))?;
                Ok(-dot(&costs, &column))
            })
            .collect()
    }

    pub fn pivots(&self) -> usize {
        self.tableau.pivots()
    }
}

fn dot<T: Pivotable>(a: &Array1<T>, b: &Array1<T>) -> T {
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (x, y)| acc + x.clone() * y.clone())
}
