use ndarray::prelude::*;

use crate::linalg::Pivotable;

use super::GameError;

/// Two-player game in normal form. Row `i`, column `j` of both payoff matrices is the outcome
/// when player 1 plays strategy `i` and player 2 strategy `j`.
#[derive(Debug, Clone)]
pub struct BimatrixGame {
    payoff: (Array2<f64>, Array2<f64>),
}

/// Mixed strategy profile: a probability vector per player.
#[derive(Debug, Clone)]
pub struct Strategy(pub Array1<f64>, pub Array1<f64>);

impl PartialEq for Strategy {
    fn eq(&self, other: &Strategy) -> bool {
        self.0.abs_diff_eq(&other.0, 1e-5) && self.1.abs_diff_eq(&other.1, 1e-5)
    }
}

impl Strategy {
    /// Normalises nonnegative weights into probabilities. `None` when a player has no weight.
    pub fn from_weights<T: Pivotable>(weights0: &[T], weights1: &[T]) -> Option<Self> {
        Some(Strategy(normalise(weights0)?, normalise(weights1)?))
    }
}

fn normalise<T: Pivotable>(weights: &[T]) -> Option<Array1<f64>> {
    let total = weights.iter().cloned().fold(T::zero(), |acc, w| acc + w);
    if !total.is_strictly_positive() {
        return None;
    }
    Some(
        weights
            .iter()
            .map(|w| (w.clone() / total.clone()).as_f64())
            .collect(),
    )
}

impl BimatrixGame {
    pub fn new(p1: Array2<f64>, p2: Array2<f64>) -> Result<Self, GameError> {
        if p1.dim() != p2.dim() {
            return Err(GameError::PayoffShapeMismatch(p1.dim(), p2.dim()));
        }
        if p1.is_empty() {
            return Err(GameError::EmptyGame);
        }
        if let Some(v) = p1.iter().chain(p2.iter()).find(|v| !v.is_finite()) {
            return Err(GameError::NonFinitePayoff(*v));
        }
        Ok(BimatrixGame { payoff: (p1, p2) })
    }

    /// Game where player 2 receives the opposite of player 1's payoff.
    pub fn zero_sum(p1: Array2<f64>) -> Result<Self, GameError> {
        let p2 = p1.mapv(|v| -v);
        Self::new(p1, p2)
    }

    pub fn num_strategies(&self) -> (usize, usize) {
        self.payoff.0.dim()
    }

    pub fn num_strategies_player(&self, player: usize) -> usize {
        self.payoff.0.shape()[player]
    }

    pub fn total_strategies(&self) -> usize {
        self.payoff.0.nrows() + self.payoff.0.ncols()
    }

    pub fn payoff_matrix(&self, player: usize) -> &Array2<f64> {
        if player == 0 {
            &self.payoff.0
        } else {
            &self.payoff.1
        }
    }

    pub fn is_zero_sum(&self) -> bool {
        self.payoff
            .0
            .abs_diff_eq(&self.payoff.1.mapv(|v| -v), 1e-9)
    }

    pub fn strategy_payoff(&self, strategy: &Strategy) -> (f64, f64) {
        let payoff0 = self.payoff.0.dot(&strategy.1).dot(&strategy.0);
        let payoff1 = self.payoff.1.dot(&strategy.1).dot(&strategy.0);

        (payoff0, payoff1)
    }

    /// What each player gains by switching to a best response.
    pub fn regret(&self, strategy: &Strategy) -> (f64, f64) {
        let strategy_payoff = self.strategy_payoff(strategy);
        let payoff0 = self.payoff.0.dot(&strategy.1);
        let payoff1 = strategy.0.dot(&self.payoff.1);

        let max_payoff0 = payoff0.fold(f64::NEG_INFINITY, |a, b| a.max(*b));
        let max_payoff1 = payoff1.fold(f64::NEG_INFINITY, |a, b| a.max(*b));
        (
            max_payoff0 - strategy_payoff.0,
            max_payoff1 - strategy_payoff.1,
        )
    }

    pub fn is_ne(&self, strategy: &Strategy) -> bool {
        let r = self.regret(strategy);

        r.0 < 1e-5 && r.1 < 1e-5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    #[test]
    fn bimatrixgame_new() {
        let a = array![[2., 1.], [1., 2.]];
        let b = array![[2., 1.], [1., 2.], [3., 4.]];

        assert_eq!(
            BimatrixGame::new(a, b).unwrap_err(),
            GameError::PayoffShapeMismatch((2, 2), (3, 2))
        );
        assert_eq!(
            BimatrixGame::new(Array2::zeros((0, 2)), Array2::zeros((0, 2))).unwrap_err(),
            GameError::EmptyGame
        );
        assert_eq!(
            BimatrixGame::zero_sum(array![[1., f64::INFINITY]]).unwrap_err(),
            GameError::NonFinitePayoff(f64::INFINITY)
        );
    }

    #[test]
    fn regret() {
        let a = array![[1. / 3., 0.], [1., 1.]];
        let b = array![[1. / 3., 1.], [0., 1.]];
        let game = BimatrixGame::new(a, b).unwrap();

        let s = Strategy(array![0., 1.], array![0., 1.]);

        assert!(game.is_ne(&s));

        let r = Strategy(array![0., 1.], array![0.5, 0.5]);
        assert_eq!(game.regret(&r), (0., 0.5));
        assert!(!game.is_ne(&r));
    }

    #[test]
    fn zero_sum() {
        let game = BimatrixGame::zero_sum(array![[1., -1.], [-1., 1.]]).unwrap();

        assert!(game.is_zero_sum());
        assert_eq!(game.num_strategies(), (2, 2));
        assert_eq!(game.total_strategies(), 4);
        assert_eq!(game.payoff_matrix(1), &array![[-1., 1.], [1., -1.]]);
    }

    #[test]
    fn weights_are_normalised() {
        let third = BigRational::new(BigInt::from(1), BigInt::from(3));
        let s = Strategy::from_weights(
            &[third.clone(), third.clone() * BigInt::from(2)],
            &[third.clone(), BigRational::from_integer(BigInt::from(0))],
        )
        .unwrap();

        assert_eq!(s, Strategy(array![1. / 3., 2. / 3.], array![1., 0.]));
        assert_eq!(Strategy::from_weights::<f64>(&[0., 0.], &[1.]), None);
    }
}
