//! Complementary pivoting: Lemke's rule, the bimatrix LCP and the search for every equilibrium
//! reachable from a known one.
mod ltableau;
pub use ltableau::*;

mod lhtableau;
pub use lhtableau::*;

mod search_config;
pub use search_config::*;

mod all_lemke;
pub use all_lemke::*;
