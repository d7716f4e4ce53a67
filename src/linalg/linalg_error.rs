use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinalgError {
    #[error("Undefined label: {0}")]
    BadLabel(isize),

    #[error("Row {0} is outside the tableau")]
    BadRow(usize),

    #[error("Singular pivot on row {row} for label {label}")]
    SingularPivot { row: usize, label: isize },

    #[error("No row can leave the basis when label {0} enters")]
    NoExitRow(isize),

    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("The tableau is not at a complementary basic feasible solution")]
    NotComplementary,
}
