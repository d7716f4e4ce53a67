use std::collections::{BTreeMap, btree_map};

use super::{Label, Pivotable};

/// Nonzero coordinates of a basic feasible solution, keyed by label.
///
/// Labels that are not defined are implicitly zero. Two solutions are equal when they define the
/// same labels with equal values, exactly for rationals and within tolerance for floats.
#[derive(Debug, Clone)]
pub struct Bfs<T> {
    values: BTreeMap<Label, T>,
}

impl<T> Default for Bfs<T> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<T: Pivotable> Bfs<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: Label, value: T) {
        self.values.insert(label, value);
    }

    /// Value of `label`, zero when it is not defined.
    pub fn get(&self, label: Label) -> T {
        self.values.get(&label).cloned().unwrap_or_else(T::zero)
    }

    pub fn is_defined(&self, label: Label) -> bool {
        self.values.contains_key(&label)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Label, T> {
        self.values.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.values.keys().copied()
    }

    /// Values of the structural labels `first..=last`, undefined ones as zero.
    pub fn structural_range(&self, first: usize, last: usize) -> Vec<T> {
        (first..=last)
            .map(|k| self.get(Label::Structural(k)))
            .collect()
    }
}

impl<T: Pivotable> PartialEq for Bfs<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|((l1, v1), (l2, v2))| l1 == l2 && v1.approx_eq(v2))
    }
}

impl<T: Pivotable> FromIterator<(Label, T)> for Bfs<T> {
    fn from_iter<I: IntoIterator<Item = (Label, T)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    #[test]
    fn undefined_labels_are_zero() {
        let bfs: Bfs<f64> = [(Label::Structural(2), 0.5)].into_iter().collect();

        assert_eq!(bfs.get(Label::Structural(2)), 0.5);
        assert_eq!(bfs.get(Label::Structural(1)), 0.);
        assert!(!bfs.is_defined(Label::Slack(2)));
        assert_eq!(bfs.structural_range(1, 3), vec![0., 0.5, 0.]);
    }

    #[test]
    fn float_equality_tolerates_rounding() {
        let a: Bfs<f64> = [(Label::Structural(1), 1. / 3.), (Label::Structural(4), 0.25)]
            .into_iter()
            .collect();
        let b: Bfs<f64> = [
            (Label::Structural(1), 1. / 3. + 1e-12),
            (Label::Structural(4), 0.25),
        ]
        .into_iter()
        .collect();
        let c: Bfs<f64> = [(Label::Structural(1), 1. / 3.)].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn exact_equality() {
        let third = BigRational::new(BigInt::from(1), BigInt::from(3));
        let a: Bfs<BigRational> = [(Label::Structural(1), third.clone())].into_iter().collect();
        let b: Bfs<BigRational> = [(Label::Structural(1), third.clone())].into_iter().collect();
        let c: Bfs<BigRational> = [(Label::Structural(2), third)].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
