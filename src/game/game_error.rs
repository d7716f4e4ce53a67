use thiserror::Error;

use crate::linalg::LinalgError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("Payoff matrices have different shapes: {0:?} and {1:?}")]
    PayoffShapeMismatch((usize, usize), (usize, usize)),
    #[error("Every player needs at least one strategy")]
    EmptyGame,
    #[error("Payoff {0} is not a finite number")]
    NonFinitePayoff(f64),
    #[error(transparent)]
    Linalg(#[from] LinalgError),
    #[error("The complementary path did not end at an equilibrium")]
    NoEquilibrium,
    #[error("The game linear program has no optimal solution")]
    Infeasible,
}
