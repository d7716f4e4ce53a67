use ndarray::Array2;

use crate::{
    lcp::{EquilibriumSearch, LhTableau, SearchReport},
    linalg::{Bfs, Label, Pivotable},
};

use super::{BimatrixGame, GameError, Strategy};

/// Converts a payoff matrix to the scalar type used for pivoting.
pub fn convert_payoff<T: Pivotable>(payoff: &Array2<f64>) -> Result<Array2<T>, GameError> {
    let mut converted = Array2::<T>::zeros(payoff.dim());
    for (c, p) in converted.iter_mut().zip(payoff.iter()) {
        *c = T::from_float(*p).ok_or(GameError::NonFinitePayoff(*p))?;
    }
    Ok(converted)
}

pub fn lh_tableau<T: Pivotable>(game: &BimatrixGame) -> Result<LhTableau<T>, GameError> {
    let p1 = convert_payoff::<T>(game.payoff_matrix(0))?;
    let p2 = convert_payoff::<T>(game.payoff_matrix(1))?;
    Ok(LhTableau::new(&p1, &p2)?)
}

/// Equilibrium at the end of the Lemke-Howson path that drops player 1's first strategy.
pub fn lemke_howson<T: Pivotable>(game: &BimatrixGame) -> Result<Strategy, GameError> {
    lemke_howson_from::<T>(game, 1)
}

/// Equilibrium at the end of the Lemke-Howson path that drops `label`: `1..=m` are player 1's
/// strategies and `m+1..=m+n` player 2's.
pub fn lemke_howson_from<T: Pivotable>(
    game: &BimatrixGame,
    label: usize,
) -> Result<Strategy, GameError> {
    let mut t = lh_tableau::<T>(game)?;
    t.lemke_path(Label::Structural(label))?;
    to_strategy(&t, &t.bfs())
}

fn to_strategy<T: Pivotable>(t: &LhTableau<T>, bfs: &Bfs<T>) -> Result<Strategy, GameError> {
    let (x, y) = t.split(bfs);
    Strategy::from_weights(&x, &y).ok_or(GameError::NoEquilibrium)
}

/// Equilibria found by a search together with the raw report.
#[derive(Debug, Clone)]
pub struct Equilibria<T: Pivotable> {
    pub strategies: Vec<Strategy>,
    pub report: SearchReport<T>,
}

/// Every equilibrium connected to the artificial one by Lemke-Howson paths.
pub fn all_equilibria<T: Pivotable>(
    game: &BimatrixGame,
    search: &EquilibriumSearch,
) -> Result<Equilibria<T>, GameError> {
    let t = lh_tableau::<T>(game)?;
    let report = search.run(t.ltableau());
    let strategies = report
        .equilibria
        .iter()
        .map(|bfs| to_strategy(&t, bfs))
        .collect::<Result<_, _>>()?;
    Ok(Equilibria { strategies, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcp::SearchConfig;
    use ndarray::array;
    use num_rational::BigRational;

    fn test_game() -> BimatrixGame {
        let a = array![[1., 3., 0.], [0., 0., 2.], [2., 1., 1.]];
        let b = array![[2., 1., 0.], [1., 3., 1.], [0., 0., 3.]];
        BimatrixGame::new(a, b).unwrap()
    }

    #[test]
    fn test_lemke_howson() {
        let game = test_game();
        let expected = Strategy(
            array![6. / 13., 3. / 13., 4. / 13.],
            array![1. / 9., 1. / 3., 5. / 9.],
        );

        let s = lemke_howson::<f64>(&game).unwrap();
        assert_eq!(s, expected);
        assert!(game.is_ne(&s));

        let exact = lemke_howson::<BigRational>(&game).unwrap();
        assert_eq!(exact, expected);
    }

    #[test]
    fn every_starting_label_reaches_an_equilibrium() {
        let game = test_game();

        for label in 1..=game.total_strategies() {
            let s = lemke_howson_from::<BigRational>(&game, label).unwrap();
            assert!(game.is_ne(&s), "label {label}");
        }
    }

    #[test]
    fn bad_starting_label() {
        let game = test_game();

        assert!(matches!(
            lemke_howson_from::<f64>(&game, 7),
            Err(GameError::Linalg(_))
        ));
    }

    #[test]
    fn matching_pennies() {
        let game = BimatrixGame::zero_sum(array![[1., -1.], [-1., 1.]]).unwrap();

        let s = lemke_howson::<BigRational>(&game).unwrap();

        assert_eq!(s, Strategy(array![0.5, 0.5], array![0.5, 0.5]));
    }

    #[test]
    fn coordination_equilibria() {
        let game = BimatrixGame::new(array![[3., 0.], [0., 2.]], array![[2., 0.], [0., 3.]]).unwrap();

        let found =
            all_equilibria::<BigRational>(&game, &EquilibriumSearch::new(SearchConfig::default()))
                .unwrap();

        assert_eq!(found.strategies.len(), 3);
        assert!(found.report.is_complete());
        assert!(found.strategies.iter().all(|s| game.is_ne(s)));
        assert!(
            found
                .strategies
                .contains(&Strategy(array![0.6, 0.4], array![0.4, 0.6]))
        );
    }
}
