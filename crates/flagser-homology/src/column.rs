//! Sparse columns of boundary matrices.

use crate::field::PrimeField;

/// Sparse column over `F_p`, entries sorted by increasing row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseColumn {
    entries: Vec<(usize, u32)>,
}

impl SparseColumn {
    /// Builds a column from unsorted entries, dropping zero coefficients.
    pub fn from_entries(mut entries: Vec<(usize, u32)>) -> Self {
        entries.retain(|&(_, coeff)| coeff != 0);
        entries.sort_unstable_by_key(|&(row, _)| row);
        Self { entries }
    }

    /// Number of non-zero entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the column is zero.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest non-zero entry (largest row) with its coefficient.
    pub fn pivot(&self) -> Option<(usize, u32)> {
        self.entries.last().copied()
    }

    /// Non-zero entries.
    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    /// `self += factor * other`.
    pub fn add_scaled(&mut self, factor: u32, other: &SparseColumn, field: &PrimeField) {
        let mut merged = Vec::with_capacity(self.entries.len() + other.entries.len());
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() || j < other.entries.len() {
            let left = self.entries.get(i);
            let right = other.entries.get(j);
            match (left, right) {
                (Some(&(lr, lc)), Some(&(rr, rc))) if lr == rr => {
                    let coeff = field.add(lc, field.mul(factor, rc));
                    if coeff != 0 {
                        merged.push((lr, coeff));
                    }
                    i += 1;
                    j += 1;
                }
                (Some(&(lr, lc)), Some(&(rr, _))) if lr < rr => {
                    merged.push((lr, lc));
                    i += 1;
                }
                (Some(&(lr, lc)), None) => {
                    merged.push((lr, lc));
                    i += 1;
                }
                (_, Some(&(rr, rc))) => {
                    let coeff = field.mul(factor, rc);
                    if coeff != 0 {
                        merged.push((rr, coeff));
                    }
                    j += 1;
                }
                (None, None) => break,
            }
        }
        self.entries = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_two_addition_cancels() {
        let field = PrimeField::new(2).unwrap();
        let mut a = SparseColumn::from_entries(vec![(3, 1), (0, 1), (1, 1)]);
        let b = SparseColumn::from_entries(vec![(1, 1), (3, 1)]);
        a.add_scaled(1, &b, &field);
        assert_eq!(a.entries(), &[(0, 1)]);
        assert_eq!(a.pivot(), Some((0, 1)));
    }

    #[test]
    fn scaled_addition_mod_three() {
        let field = PrimeField::new(3).unwrap();
        let mut a = SparseColumn::from_entries(vec![(0, 1), (2, 2)]);
        let b = SparseColumn::from_entries(vec![(1, 1), (2, 1)]);
        a.add_scaled(1, &b, &field);
        assert_eq!(a.entries(), &[(0, 1), (1, 1)]);
    }
}
