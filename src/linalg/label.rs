use std::{fmt, ops::Neg};

/// Variable of a tableau.
///
/// A structural label addresses a column of the constraint matrix and a slack label the slack
/// variable of a row. `Structural(k)` and `Slack(k)` form a complementary pair, written `k` and
/// `-k` in the signed convention. `Structural(0)` is the artificial label 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Structural(usize),
    Slack(usize),
}

impl Label {
    pub const ARTIFICIAL: Label = Label::Structural(0);

    /// Builds a label from its signed representation: `k > 0` is structural, `k < 0` is the
    /// slack of the row `|k|` and `0` is the artificial label.
    pub fn from_signed(label: isize) -> Self {
        if label < 0 {
            Label::Slack(label.unsigned_abs())
        } else {
            Label::Structural(label as usize)
        }
    }

    pub fn signed(&self) -> isize {
        match *self {
            Label::Structural(k) => k as isize,
            Label::Slack(k) => -(k as isize),
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            Label::Structural(k) | Label::Slack(k) => k,
        }
    }

    pub fn is_slack(&self) -> bool {
        matches!(self, Label::Slack(_))
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, Label::Structural(_))
    }

    pub fn is_artificial(&self) -> bool {
        *self == Label::ARTIFICIAL
    }

    /// The other member of the complementary pair. The artificial label is its own complement.
    pub fn complement(&self) -> Self {
        match *self {
            Label::Structural(0) => Label::ARTIFICIAL,
            Label::Structural(k) => Label::Slack(k),
            Label::Slack(k) => Label::Structural(k),
        }
    }
}

impl Neg for Label {
    type Output = Label;

    fn neg(self) -> Self::Output {
        self.complement()
    }
}

impl From<isize> for Label {
    fn from(label: isize) -> Self {
        Label::from_signed(label)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signed())
    }
}
