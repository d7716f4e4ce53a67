use crate::linalg::{Bfs, Label, LinalgError, Pivotable};

use super::{CancelToken, LTableau, LhTableau, SearchConfig};

/// Outcome of an equilibrium search.
#[derive(Debug, Clone)]
pub struct SearchReport<T: Pivotable> {
    /// Complementary solutions found, without duplicates and without the starting one.
    pub equilibria: Vec<Bfs<T>>,
    /// A count or depth bound stopped the exploration, so the list may be incomplete.
    pub truncated: bool,
    pub cancelled: bool,
    /// Errors of the branches that were abandoned.
    pub errors: Vec<LinalgError>,
}

impl<T: Pivotable> SearchReport<T> {
    fn new() -> Self {
        Self {
            equilibria: Vec::new(),
            truncated: false,
            cancelled: false,
            errors: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.truncated && !self.cancelled && self.errors.is_empty()
    }
}

/// Enumerates the complementary solutions connected to a starting one by Lemke paths.
///
/// Every solution found is a node; from each node a path is followed for every label except
/// the one used to reach it. The exploration uses an explicit worklist of tableau clones.
#[derive(Debug, Clone, Default)]
pub struct EquilibriumSearch {
    config: SearchConfig,
    cancel: CancelToken,
}

struct Node<T: Pivotable> {
    tableau: LTableau<T>,
    arrived_by: Option<Label>,
    depth: usize,
}

impl EquilibriumSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn run<T: Pivotable>(&self, start: &LTableau<T>) -> SearchReport<T> {
        self.run_with(start, |_| {})
    }

    /// Runs the search, calling `on_equilibrium` once for every new solution.
    pub fn run_with<T, F>(&self, start: &LTableau<T>, mut on_equilibrium: F) -> SearchReport<T>
    where
        T: Pivotable,
        F: FnMut(&Bfs<T>),
    {
        let mut report = SearchReport::new();
        if !start.is_complementary() {
            report.errors.push(LinalgError::NotComplementary);
            return report;
        }

        let basis = start.tableau().basis();
        let labels: Vec<Label> = (basis.first_label().max(1)..=basis.last_label())
            .map(Label::Structural)
            .collect();
        let mut seen = vec![start.bfs()];
        let mut worklist = vec![Node {
            tableau: start.clone(),
            arrived_by: None,
            depth: 0,
        }];

        'search: while let Some(node) = worklist.pop() {
            if self.config.depth_exceeded(node.depth) {
                report.truncated = true;
                continue;
            }
            for label in labels.iter().copied() {
                if node.arrived_by == Some(label) {
                    continue;
                }
                if self.cancel.is_cancelled() {
                    report.cancelled = true;
                    break 'search;
                }
                if self.config.count_reached(report.equilibria.len()) {
                    report.truncated = true;
                    break 'search;
                }

                let mut branch = node.tableau.clone();
                if let Err(err) = branch.lemke_path(label) {
                    log::warn!("path from {label} at depth {} abandoned: {err}", node.depth);
                    report.errors.push(err);
                    continue;
                }
                let bfs = branch.bfs();
                if seen.contains(&bfs) {
                    continue;
                }
                log::debug!(
                    "equilibrium {} found dropping {label} at depth {}",
                    report.equilibria.len() + 1,
                    node.depth
                );
                on_equilibrium(&bfs);
                seen.push(bfs.clone());
                report.equilibria.push(bfs);
                worklist.push(Node {
                    tableau: branch,
                    arrived_by: Some(label),
                    depth: node.depth + 1,
                });
            }
        }

        log::info!(
            "search found {} equilibria ({} abandoned paths{})",
            report.equilibria.len(),
            report.errors.len(),
            if report.truncated { ", truncated" } else { "" }
        );
        report
    }
}

/// Every equilibrium reachable from the artificial equilibrium of the bimatrix tableau.
pub fn all_lemke<T: Pivotable>(start: &LhTableau<T>, config: SearchConfig) -> SearchReport<T> {
    EquilibriumSearch::new(config).run(start.ltableau())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn rational(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn coordination() -> LhTableau<BigRational> {
        let a = array![[3, 0], [0, 2]].mapv(|v| rational(v, 1));
        let b = array![[2, 0], [0, 3]].mapv(|v| rational(v, 1));
        LhTableau::new(&a, &b).unwrap()
    }

    fn no_duplicates<T: Pivotable>(equilibria: &[Bfs<T>]) -> bool {
        equilibria
            .iter()
            .enumerate()
            .all(|(i, a)| equilibria[i + 1..].iter().all(|b| a != b))
    }

    #[test]
    fn coordination_game_has_three_equilibria() {
        let start = coordination();

        let report = all_lemke(&start, SearchConfig::default());

        assert!(report.is_complete());
        assert_eq!(report.equilibria.len(), 3);
        assert!(no_duplicates(&report.equilibria));
        let profiles: Vec<_> = report.equilibria.iter().map(|e| start.split(e)).collect();
        let mixed = (
            vec![rational(3, 11), rational(2, 11)],
            vec![rational(2, 11), rational(3, 11)],
        );
        assert!(profiles.contains(&mixed));
        assert!(profiles.contains(&(
            vec![rational(1, 3), rational(0, 1)],
            vec![rational(1, 4), rational(0, 1)]
        )));
        assert!(profiles.contains(&(
            vec![rational(0, 1), rational(1, 4)],
            vec![rational(0, 1), rational(1, 3)]
        )));
    }

    #[test]
    fn dominant_strategies() {
        let a = array![[3., 4.], [1., 2.]];
        let b = array![[3., 1.], [4., 2.]];
        let start = LhTableau::new(&a, &b).unwrap();

        let report = all_lemke(&start, SearchConfig::default());

        assert_eq!(report.equilibria.len(), 1);
        let (x, y) = start.split(&report.equilibria[0]);
        assert!(x[0] > 0. && x[1] == 0.);
        assert!(y[0] > 0. && y[1] == 0.);
    }

    #[test]
    fn stop_after_bounds_the_count() {
        let report = all_lemke(&coordination(), SearchConfig::new(1, 0));

        assert_eq!(report.equilibria.len(), 1);
        assert!(report.truncated);
    }

    #[test]
    fn depth_bound() {
        let shallow = EquilibriumSearch::new(SearchConfig::new(0, 1)).run(coordination().ltableau());

        // Solutions two paths away from the start are kept but not expanded.
        assert!(shallow.truncated);
        assert!(shallow.equilibria.len() >= 2);
        assert!(no_duplicates(&shallow.equilibria));
    }

    #[test]
    fn observer_sees_every_equilibrium() {
        let mut seen = 0;
        let report = EquilibriumSearch::default().run_with(coordination().ltableau(), |_| seen += 1);

        assert_eq!(seen, report.equilibria.len());
    }

    #[test]
    fn cancelled_search_stops() {
        let token = CancelToken::new();
        token.cancel();

        let report = EquilibriumSearch::new(SearchConfig::default())
            .with_cancel_token(token)
            .run(coordination().ltableau());

        assert!(report.cancelled);
        assert!(report.equilibria.is_empty());
    }

    #[test]
    fn degenerate_game_terminates() {
        // Tied rows force ties in the ratio test.
        let a: Array2<f64> = array![[1., 1.], [1., 1.], [0., 2.]];
        let b: Array2<f64> = array![[1., 0.], [1., 0.], [0., 1.]];
        let start = LhTableau::new(&a, &b).unwrap();

        let report = all_lemke(&start, SearchConfig::default());

        assert!(!report.equilibria.is_empty());
        assert!(no_duplicates(&report.equilibria));
        assert!(report.errors.is_empty());
    }
}
