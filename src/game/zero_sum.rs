use ndarray::Array1;

use crate::{linalg::Pivotable, lp::LpSolve};

use super::{BimatrixGame, GameError, Strategy, convert_payoff};

/// Optimal strategies of a two-player zero-sum game and the value to player 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroSumSolution {
    pub strategy: Strategy,
    pub value: f64,
}

/// Solves the zero-sum game of player 1's payoff matrix `A` by linear programming.
///
/// With the payoffs shifted to `A' >= 1`, player 1's mix is `p / sum(p)` for the `p >= 0`
/// minimising `sum(p)` subject to `A'^T p >= 1`, and the value is `1 / sum(p)` minus the shift.
/// Player 2's mix comes from the shadow prices of the same program.
pub fn solve_zero_sum<T: Pivotable>(game: &BimatrixGame) -> Result<ZeroSumSolution, GameError> {
    let payoff = convert_payoff::<T>(game.payoff_matrix(0))?;
    let (m, n) = payoff.dim();
    let shift = payoff
        .iter()
        .cloned()
        .reduce(|a, b| if b < a { b } else { a })
        .ok_or(GameError::EmptyGame)?
        - T::one();

    let constraints = payoff.t().mapv(|v| v - shift.clone());
    let ones = Array1::from_elem(n, T::one());
    let costs = Array1::from_elem(m, -T::one());
    let lp = LpSolve::new(&constraints, &ones, &costs, 0)?;

    let p = lp.optimum().ok_or(GameError::Infeasible)?;
    let u = match lp.dual_values() {
        Some(duals) => duals?,
        None => return Err(GameError::Infeasible),
    };
    let total = p.iter().cloned().fold(T::zero(), |acc, v| acc + v);
    if !total.is_strictly_positive() {
        return Err(GameError::Infeasible);
    }
    let value = T::one() / total + shift;

    // The shadow prices are nonpositive.
    let q = u.mapv(|v| -v);
    let strategy = Strategy::from_weights(&p.to_vec(), &q.to_vec()).ok_or(GameError::Infeasible)?;
    log::debug!(
        "zero-sum game solved in {} pivots, value {:?}",
        lp.total_pivots(),
        value
    );
    Ok(ZeroSumSolution {
        strategy,
        value: value.as_f64(),
    })
}
