use super::{Label, LinalgError};

/// Assignment of labels to the rows of a tableau.
///
/// Rows are numbered from 0. Structural labels range over `first_label..=last_label` and slack
/// labels over `1..=num_rows`, the slack `k` belonging to row `k - 1`. Every row holds exactly one
/// label and the reverse lookups always agree with the row array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    rows: Vec<Label>,
    structural_rows: Vec<Option<usize>>,
    slack_rows: Vec<Option<usize>>,
    blocked_structural: Vec<bool>,
    blocked_slack: Vec<bool>,
    first_label: usize,
}

impl Basis {
    /// Creates the basis with every slack basic in its own row.
    pub fn new(first_label: usize, last_label: usize, num_rows: usize) -> Self {
        let num_labels = (last_label + 1).saturating_sub(first_label);
        Self {
            rows: (1..=num_rows).map(Label::Slack).collect(),
            structural_rows: vec![None; num_labels],
            slack_rows: (0..num_rows).map(Some).collect(),
            blocked_structural: vec![false; num_labels],
            blocked_slack: vec![false; num_rows],
            first_label,
        }
    }

    pub fn first(&self) -> usize {
        0
    }

    pub fn last(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn first_label(&self) -> usize {
        self.first_label
    }

    pub fn last_label(&self) -> usize {
        (self.first_label + self.structural_rows.len()).saturating_sub(1)
    }

    pub fn num_structural(&self) -> usize {
        self.structural_rows.len()
    }

    pub fn is_slack_label(&self, label: Label) -> bool {
        matches!(label, Label::Slack(k) if k >= 1 && k <= self.rows.len())
    }

    pub fn is_structural_label(&self, label: Label) -> bool {
        matches!(label, Label::Structural(k)
            if k >= self.first_label && k - self.first_label < self.structural_rows.len())
    }

    pub fn is_valid(&self, label: Label) -> bool {
        self.is_slack_label(label) || self.is_structural_label(label)
    }

    /// Every structural label followed by every slack label.
    pub fn all_labels(&self) -> impl Iterator<Item = Label> + '_ {
        (0..self.structural_rows.len())
            .map(|k| Label::Structural(k + self.first_label))
            .chain((1..=self.rows.len()).map(Label::Slack))
    }

    /// Row of a basic label, `None` when the label is not basic or not defined.
    pub fn position(&self, label: Label) -> Option<usize> {
        match label {
            Label::Slack(k) if self.is_slack_label(label) => self.slack_rows[k - 1],
            Label::Structural(k) if self.is_structural_label(label) => {
                self.structural_rows[k - self.first_label]
            }
            _ => None,
        }
    }

    pub fn is_member(&self, label: Label) -> bool {
        self.position(label).is_some()
    }

    pub fn find(&self, label: Label) -> Result<usize, LinalgError> {
        self.position(label)
            .ok_or(LinalgError::BadLabel(label.signed()))
    }

    pub fn label(&self, row: usize) -> Label {
        self.rows[row]
    }

    pub fn labels(&self) -> &[Label] {
        &self.rows
    }

    /// Installs `entering` in `row` and returns the label that leaves.
    pub fn pivot(&mut self, row: usize, entering: Label) -> Result<Label, LinalgError> {
        if row >= self.rows.len() {
            return Err(LinalgError::BadRow(row));
        }
        if !self.is_valid(entering) {
            return Err(LinalgError::BadLabel(entering.signed()));
        }
        let leaving = self.rows[row];
        if leaving == entering {
            return Ok(leaving);
        }
        if self.is_member(entering) {
            return Err(LinalgError::BadLabel(entering.signed()));
        }
        *self.slot_mut(leaving) = None;
        *self.slot_mut(entering) = Some(row);
        self.rows[row] = entering;
        Ok(leaving)
    }

    /// Excludes a label from entering the basis.
    pub fn mark(&mut self, label: Label) {
        if let Some(blocked) = self.blocked_mut(label) {
            *blocked = true;
        }
    }

    pub fn unmark(&mut self, label: Label) {
        if let Some(blocked) = self.blocked_mut(label) {
            *blocked = false;
        }
    }

    pub fn is_blocked(&self, label: Label) -> bool {
        match label {
            Label::Slack(k) if self.is_slack_label(label) => self.blocked_slack[k - 1],
            Label::Structural(k) if self.is_structural_label(label) => {
                self.blocked_structural[k - self.first_label]
            }
            _ => false,
        }
    }

    // Only called with labels already checked by `is_valid`.
    fn slot_mut(&mut self, label: Label) -> &mut Option<usize> {
        match label {
            Label::Slack(k) => &mut self.slack_rows[k - 1],
            Label::Structural(k) => &mut self.structural_rows[k - self.first_label],
        }
    }

    fn blocked_mut(&mut self, label: Label) -> Option<&mut bool> {
        match label {
            Label::Slack(k) if self.is_slack_label(label) => Some(&mut self.blocked_slack[k - 1]),
            Label::Structural(k) if self.is_structural_label(label) => {
                Some(&mut self.blocked_structural[k - self.first_label])
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consistent(basis: &Basis) -> bool {
        basis
            .labels()
            .iter()
            .enumerate()
            .all(|(row, label)| basis.position(*label) == Some(row))
            && basis
                .all_labels()
                .filter(|label| basis.is_member(*label))
                .count()
                == basis.num_rows()
    }

    #[test]
    fn initial_basis() {
        let basis = Basis::new(1, 4, 3);

        assert_eq!(
            basis.labels(),
            &[Label::Slack(1), Label::Slack(2), Label::Slack(3)]
        );
        assert_eq!(basis.first(), 0);
        assert_eq!(basis.last(), 2);
        assert_eq!(basis.last_label(), 4);
        assert!(basis.is_structural_label(Label::Structural(4)));
        assert!(!basis.is_structural_label(Label::Structural(5)));
        assert!(!basis.is_structural_label(Label::ARTIFICIAL));
        assert!(basis.is_slack_label(Label::Slack(3)));
        assert!(!basis.is_slack_label(Label::Slack(4)));
        assert_eq!(basis.find(Label::Slack(2)), Ok(1));
        assert_eq!(basis.find(Label::Structural(2)), Err(LinalgError::BadLabel(2)));
        assert!(consistent(&basis));
    }

    #[test]
    fn artificial_column() {
        let basis = Basis::new(0, 2, 2);

        assert!(basis.is_structural_label(Label::ARTIFICIAL));
        assert_eq!(basis.all_labels().count(), 5);
    }

    #[test]
    fn pivot_updates_lookups() {
        let mut basis = Basis::new(1, 3, 3);

        assert_eq!(basis.pivot(1, Label::Structural(3)), Ok(Label::Slack(2)));
        assert_eq!(basis.find(Label::Structural(3)), Ok(1));
        assert!(!basis.is_member(Label::Slack(2)));
        assert!(consistent(&basis));

        assert_eq!(basis.pivot(0, Label::Slack(2)), Ok(Label::Slack(1)));
        assert_eq!(basis.find(Label::Slack(2)), Ok(0));
        assert!(consistent(&basis));
    }

    #[test]
    fn pivot_rejects_bad_labels() {
        let mut basis = Basis::new(1, 3, 3);

        assert_eq!(
            basis.pivot(0, Label::Structural(7)),
            Err(LinalgError::BadLabel(7))
        );
        assert_eq!(basis.pivot(0, Label::Slack(2)), Err(LinalgError::BadLabel(-2)));
        assert_eq!(basis.pivot(5, Label::Structural(1)), Err(LinalgError::BadRow(5)));
        assert_eq!(basis, Basis::new(1, 3, 3));
    }

    #[test]
    fn blocked_labels() {
        let mut basis = Basis::new(1, 3, 3);

        basis.mark(Label::Structural(2));
        basis.mark(Label::Slack(1));
        basis.mark(Label::Structural(9));
        assert!(basis.is_blocked(Label::Structural(2)));
        assert!(basis.is_blocked(Label::Slack(1)));
        assert!(!basis.is_blocked(Label::Structural(9)));

        basis.unmark(Label::Structural(2));
        assert!(!basis.is_blocked(Label::Structural(2)));
    }
}
