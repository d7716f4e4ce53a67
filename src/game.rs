//! Bimatrix games and the equilibrium solvers built on the pivoting core.
mod bimatrix_game;
pub use self::bimatrix_game::*;

mod lemke_howson;
pub use self::lemke_howson::*;

mod zero_sum;
pub use self::zero_sum::*;

mod game_error;
pub use game_error::GameError;
