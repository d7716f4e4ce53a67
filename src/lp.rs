//! Linear programs `max c.x` subject to `A x >= b`, `x >= 0`, solved with the two-phase simplex
//! method on the shared tableau.
mod lp_tableau;
pub use lp_tableau::*;

mod lp_solve;
pub use lp_solve::*;
