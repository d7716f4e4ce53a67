//! Tableau bookkeeping and row reduction shared by the LCP and LP solvers.
mod label;
pub use label::*;

mod basis;
pub use basis::*;

mod pivotable;
pub use pivotable::*;

mod tableau;
pub use tableau::*;

mod bfs;
pub use bfs::*;

mod linalg_error;
pub use linalg_error::LinalgError;
