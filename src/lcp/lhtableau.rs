use ndarray::{Array1, Array2, s};

use crate::linalg::{Bfs, Label, LinalgError, Pivotable, Tableau};

use super::LTableau;

/// Complementary pivoting tableau of a bimatrix game.
///
/// With `m` strategies for player 1 and `n` for player 2, labels `1..=m` are player 1's
/// strategies and `m+1..=m+n` player 2's. Row `i < m` is the best-response constraint of player
/// 1's strategy `i + 1` against player 2's mix, row `m + j` the one of player 2's strategy
/// `m + j + 1`. The starting basis, every slack basic, is the artificial equilibrium.
#[derive(Debug, Clone)]
pub struct LhTableau<T: Pivotable> {
    ltableau: LTableau<T>,
    num_strategies: (usize, usize),
}

impl<T: Pivotable> LhTableau<T> {
    /// Builds the tableau from the two `m x n` payoff matrices, rows indexed by player 1's
    /// strategies in both.
    pub fn new(payoff1: &Array2<T>, payoff2: &Array2<T>) -> Result<Self, LinalgError> {
        if payoff1.dim() != payoff2.dim() {
            return Err(LinalgError::DimensionMismatch {
                what: "payoff matrices",
                expected: payoff1.len(),
                found: payoff2.len(),
            });
        }
        let (m, n) = payoff1.dim();
        if m == 0 || n == 0 {
            return Err(LinalgError::DimensionMismatch {
                what: "strategies",
                expected: 1,
                found: 0,
            });
        }

        let mut a = Array2::<T>::zeros((m + n, m + n + 1));
        a.slice_mut(s![0..m, m + 1..m + n + 1])
            .assign(&negative_block(payoff1));
        a.slice_mut(s![m..m + n, 1..m + 1])
            .assign(&negative_block(payoff2).t());
        let b = Array1::from_elem(m + n, -T::one());

        Ok(Self {
            ltableau: LTableau::new(&a, &b)?,
            num_strategies: (m, n),
        })
    }

    pub fn num_strategies(&self) -> (usize, usize) {
        self.num_strategies
    }

    pub fn ltableau(&self) -> &LTableau<T> {
        &self.ltableau
    }

    pub fn tableau(&self) -> &Tableau<T> {
        self.ltableau.tableau()
    }

    pub fn lemke_path(&mut self, start: Label) -> Result<(), LinalgError> {
        self.ltableau.lemke_path(start)
    }

    pub fn pivot_in(&mut self, entering: Label) -> Result<Label, LinalgError> {
        self.ltableau.pivot_in(entering)
    }

    pub fn exit_index(&self, entering: Label) -> Result<usize, LinalgError> {
        self.ltableau.exit_index(entering)
    }

    pub fn is_complementary(&self) -> bool {
        self.ltableau.is_complementary()
    }

    pub fn bfs(&self) -> Bfs<T> {
        self.ltableau.bfs()
    }

    /// Unnormalised strategy weights of both players in `bfs`.
    pub fn split(&self, bfs: &Bfs<T>) -> (Vec<T>, Vec<T>) {
        let (m, n) = self.num_strategies;
        (bfs.structural_range(1, m), bfs.structural_range(m + 1, m + n))
    }
}

/// `c - payoff` with `c` one below the smallest payoff, so every entry is at most -1.
fn negative_block<T: Pivotable>(payoff: &Array2<T>) -> Array2<T> {
    let min = payoff
        .iter()
        .cloned()
        .reduce(|a, b| if b < a { b } else { a })
        .unwrap_or_else(T::zero);
    let shift = min - T::one();
    payoff.mapv(|p| shift.clone() - p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn rational(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn test_tableau() -> LhTableau<f64> {
        let a = array![[1., 2., 3.], [4., 5., 6.]];
        let b = array![[7., 8., 9.], [10., 11., 12.]];
        LhTableau::new(&a, &b).unwrap()
    }

    #[test]
    fn tableau_size() {
        let t = test_tableau();

        assert_eq!(t.num_strategies(), (2, 3));
        assert_eq!(t.tableau().num_rows(), 5);
        assert_eq!(t.tableau().basis().first_label(), 0);
        assert_eq!(t.tableau().basis().last_label(), 5);
    }

    #[test]
    fn tableau_content() {
        let t = test_tableau();

        assert_eq!(
            t.tableau().basis().labels(),
            &[-1, -2, -3, -4, -5].map(Label::from_signed)
        );
        assert_abs_diff_eq!(t.tableau().basis_vector(), Array1::from_elem(5, 1.));
        assert_abs_diff_eq!(
            t.tableau().solve_column(Label::ARTIFICIAL).unwrap(),
            Array1::<f64>::zeros(5)
        );
        // The slack basis is -I, so columns read as the shifted payoffs themselves.
        assert_abs_diff_eq!(
            t.tableau().solve_column(Label::Structural(1)).unwrap(),
            array![0., 0., 1., 2., 3.]
        );
        assert_abs_diff_eq!(
            t.tableau().solve_column(Label::Structural(5)).unwrap(),
            array![3., 6., 0., 0., 0.]
        );
        assert!(t.is_complementary());
        assert!(t.bfs().is_empty());
    }

    #[test]
    fn mismatched_payoffs() {
        let a = array![[2., 1.], [1., 2.]];
        let b = array![[2., 1.], [1., 2.], [3., 4.]];

        assert!(matches!(
            LhTableau::new(&a, &b),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn first_pivot() {
        let a = array![[1., 3., 0.], [0., 0., 2.], [2., 1., 1.]];
        let b = array![[2., 1., 0.], [1., 3., 1.], [0., 0., 3.]];
        let mut t = LhTableau::new(&a, &b).unwrap();

        // Player 2's best response to strategy 1 is their first strategy, label 4.
        assert_eq!(t.pivot_in(Label::Structural(1)), Ok(Label::Slack(4)));
        assert_abs_diff_eq!(t.tableau().basic_value(Label::Structural(1)).unwrap(), 1. / 3.);
    }

    #[test]
    fn matching_pennies() {
        let a = array![[1, -1], [-1, 1]].mapv(|v| rational(v, 1));
        let b = a.mapv(|v| -v);
        let mut t = LhTableau::new(&a, &b).unwrap();

        t.lemke_path(Label::Structural(1)).unwrap();

        assert!(t.is_complementary());
        let (x, y) = t.split(&t.bfs());
        let quarter = rational(1, 4);
        assert_eq!(x, vec![quarter.clone(), quarter.clone()]);
        assert_eq!(y, vec![quarter.clone(), quarter]);
    }

    #[test]
    fn lemke_path_from_basic_label() {
        let a = array![[3., 0.], [0., 2.]];
        let b = array![[2., 0.], [0., 3.]];
        let mut t = LhTableau::new(&a, &b).unwrap();

        t.lemke_path(Label::Structural(1)).unwrap();
        let first = t.bfs();
        assert!(t.tableau().is_member(Label::Structural(1)));

        // Starting again from a basic label drops it, here back to the artificial equilibrium.
        t.lemke_path(Label::Structural(1)).unwrap();
        assert!(t.bfs().is_empty());
        assert!(!first.is_empty());
    }
}
