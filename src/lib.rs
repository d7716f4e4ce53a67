//! Equilibria of two-player games computed as solutions of linear complementarity problems.
//!
//! The [`linalg`] module holds the pivoting engine, [`lcp`] the complementary pivot rule and the
//! search for every equilibrium reachable by pivoting, [`lp`] a two-phase simplex built on the
//! same tableau and [`game`] the bimatrix game front-end.
pub mod game;
pub mod lcp;
pub mod linalg;
pub mod lp;

pub use game::*;
