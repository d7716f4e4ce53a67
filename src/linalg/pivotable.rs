use std::{cmp::Ordering, fmt::Debug};

use ndarray::{Array2, Zip};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{FromPrimitive, Num, One, Signed, ToPrimitive, Zero};

const F64_ZERO_TOLERANCE: f64 = 1e-9;
const F64_EQ_TOLERANCE: f64 = 1e-7;

/// Scalar type a [`Tableau`](super::Tableau) can pivot with.
///
/// The working tableau stores `Entry` values together with one shared denominator: the value of
/// an entry is `entry / denom`. Floating point keeps the denominator at 1 and pivots in the usual
/// Gauss-Jordan way. The exact implementation stores big integers and pivots fraction-free
/// (Bareiss), so every intermediate entry is an exact integer and the denominator is the last
/// pivot element.
pub trait Pivotable: Num + Signed + Clone + Debug + PartialOrd {
    type Entry: Clone + Debug + PartialEq;

    /// Number of pivots after which the tableau is rebuilt from the original data.
    const REFACTOR_INTERVAL: Option<usize>;

    /// Converts the original data into working entries with a unit denominator.
    fn to_entries(data: &Array2<Self>) -> Array2<Self::Entry>;

    fn unit_entry() -> Self::Entry;

    /// Pivots `work` on `(row, col)` and updates the shared denominator.
    fn pivot_entries(work: &mut Array2<Self::Entry>, denom: &mut Self::Entry, row: usize, col: usize);

    fn value(entry: &Self::Entry, denom: &Self::Entry) -> Self;

    fn entry_is_zero(entry: &Self::Entry) -> bool;

    /// Compares magnitudes, used to choose pivots while refactoring.
    fn entry_magnitude_cmp(a: &Self::Entry, b: &Self::Entry) -> Ordering;

    fn is_negligible(&self) -> bool;

    fn is_strictly_positive(&self) -> bool {
        !self.is_negligible() && self.is_positive()
    }

    fn is_strictly_negative(&self) -> bool {
        !self.is_negligible() && self.is_negative()
    }

    /// `self < other` beyond the comparison tolerance of the type.
    fn definitely_less(&self, other: &Self) -> bool;

    fn approx_eq(&self, other: &Self) -> bool;

    fn from_int(n: i64) -> Self;

    /// Converts a float, exactly for rationals. `None` for infinities and NaN.
    fn from_float(x: f64) -> Option<Self>;

    fn as_f64(&self) -> f64;
}

impl Pivotable for f64 {
    type Entry = f64;

    const REFACTOR_INTERVAL: Option<usize> = Some(50);

    fn to_entries(data: &Array2<f64>) -> Array2<f64> {
        data.clone()
    }

    fn unit_entry() -> f64 {
        1.
    }

    fn pivot_entries(work: &mut Array2<f64>, _denom: &mut f64, row: usize, col: usize) {
        let pivot = work[[row, col]];
        let pivot_row = work.row(row).mapv(|a| a / pivot);
        work.row_mut(row).assign(&pivot_row);
        work[[row, col]] = 1.;
        for (i, mut r) in work.rows_mut().into_iter().enumerate() {
            if i != row {
                let factor = r[col];
                if factor != 0. {
                    r.scaled_add(-factor, &pivot_row);
                }
                r[col] = 0.;
            }
        }
    }

    fn value(entry: &f64, denom: &f64) -> f64 {
        entry / denom
    }

    fn entry_is_zero(entry: &f64) -> bool {
        entry.abs() <= F64_ZERO_TOLERANCE
    }

    fn entry_magnitude_cmp(a: &f64, b: &f64) -> Ordering {
        a.abs().total_cmp(&b.abs())
    }

    fn is_negligible(&self) -> bool {
        self.abs() <= F64_ZERO_TOLERANCE
    }

    fn definitely_less(&self, other: &f64) -> bool {
        *self < *other - F64_ZERO_TOLERANCE
    }

    fn approx_eq(&self, other: &f64) -> bool {
        (self - other).abs() <= F64_EQ_TOLERANCE * (1. + self.abs().max(other.abs()))
    }

    fn from_int(n: i64) -> f64 {
        n as f64
    }

    fn from_float(x: f64) -> Option<f64> {
        x.is_finite().then_some(x)
    }

    fn as_f64(&self) -> f64 {
        *self
    }
}

impl Pivotable for BigRational {
    type Entry = BigInt;

    const REFACTOR_INTERVAL: Option<usize> = None;

    /// Scales the data by the lcm of its denominators so that every entry is an integer.
    fn to_entries(data: &Array2<BigRational>) -> Array2<BigInt> {
        let lcm = data
            .iter()
            .fold(BigInt::one(), |acc, q| acc.lcm(q.denom()));
        data.mapv(|q| q.numer() * (&lcm / q.denom()))
    }

    fn unit_entry() -> BigInt {
        BigInt::one()
    }

    fn pivot_entries(work: &mut Array2<BigInt>, denom: &mut BigInt, row: usize, col: usize) {
        let pivot = work[[row, col]].clone();
        let pivot_row = work.row(row).to_owned();
        for (i, mut r) in work.rows_mut().into_iter().enumerate() {
            if i == row {
                continue;
            }
            let factor = r[col].clone();
            if factor.is_zero() {
                r.mapv_inplace(|a| a * &pivot / &*denom);
            } else {
                Zip::from(&mut r).and(&pivot_row).for_each(|a, p| {
                    *a = (&*a * &pivot - &factor * p) / &*denom;
                });
            }
        }
        *denom = pivot;
        if denom.is_negative() {
            work.mapv_inplace(|a| -a);
            *denom = -&*denom;
        }
    }

    fn value(entry: &BigInt, denom: &BigInt) -> BigRational {
        BigRational::new(entry.clone(), denom.clone())
    }

    fn entry_is_zero(entry: &BigInt) -> bool {
        entry.is_zero()
    }

    fn entry_magnitude_cmp(a: &BigInt, b: &BigInt) -> Ordering {
        a.abs().cmp(&b.abs())
    }

    fn is_negligible(&self) -> bool {
        self.is_zero()
    }

    fn definitely_less(&self, other: &BigRational) -> bool {
        self < other
    }

    fn approx_eq(&self, other: &BigRational) -> bool {
        self == other
    }

    fn from_int(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn from_float(x: f64) -> Option<BigRational> {
        BigRational::from_f64(x)
    }

    fn as_f64(&self) -> f64 {
        ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }
}
