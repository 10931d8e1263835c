//! Standard column reduction of a boundary matrix.

use flagser_core::params::Approximation;
use tracing::{debug, warn};

use crate::boundary::BoundaryMatrix;
use crate::column::SparseColumn;
use crate::field::PrimeField;

/// Fate of a column after reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOutcome {
    /// The column reduced to zero, so its simplex is a cycle.
    Cycle,
    /// The column kept a pivot at the given row, pairing the two simplices.
    Pivot(usize),
    /// The column outgrew the approximation limit and was abandoned.
    Skipped,
}

/// Outcome of reducing one boundary matrix.
#[derive(Debug, Clone)]
pub struct Reduction {
    dimension: usize,
    outcomes: Vec<ColumnOutcome>,
    skipped: usize,
}

impl Reduction {
    /// Dimension `k` of the reduced boundary map.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Per-column outcomes, in column order.
    pub fn outcomes(&self) -> &[ColumnOutcome] {
        &self.outcomes
    }

    /// Number of columns abandoned by the approximation policy.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// `(row, column)` pairs for every column that kept a pivot.
    pub fn pivots(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(column, outcome)| match outcome {
                ColumnOutcome::Pivot(row) => Some((*row, column)),
                _ => None,
            })
    }
}

/// Reduces columns left to right so that no two columns share a pivot.
///
/// Under [`Approximation::Bounded`] a column holding more entries than the
/// limit, before or during reduction, is skipped and contributes neither a
/// pair nor a cycle.
pub fn reduce(matrix: BoundaryMatrix, field: &PrimeField, approximation: Approximation) -> Reduction {
    let dimension = matrix.dimension();
    let rows = matrix.rows();
    let limit = approximation.limit();
    let too_large = |column: &SparseColumn| limit.is_some_and(|limit| column.len() > limit);

    // Row -> index into `reduced` of the column owning that pivot.
    let mut pivot_owner: Vec<Option<usize>> = vec![None; rows];
    let mut reduced: Vec<SparseColumn> = Vec::new();
    let mut outcomes = Vec::with_capacity(matrix.cols());
    let mut skipped = 0usize;

    for mut column in matrix.into_columns() {
        let outcome = loop {
            if too_large(&column) {
                break ColumnOutcome::Skipped;
            }
            let Some((row, coeff)) = column.pivot() else {
                break ColumnOutcome::Cycle;
            };
            match pivot_owner[row] {
                Some(owner) => {
                    let other = &reduced[owner];
                    let (_, other_coeff) = other.pivot().unwrap_or((row, 1));
                    let factor = field.neg(field.mul(coeff, field.inv(other_coeff)));
                    column.add_scaled(factor, other, field);
                }
                None => break ColumnOutcome::Pivot(row),
            }
        };

        if let ColumnOutcome::Pivot(row) = outcome {
            pivot_owner[row] = Some(reduced.len());
            reduced.push(column);
        } else if outcome == ColumnOutcome::Skipped {
            skipped += 1;
        }
        outcomes.push(outcome);
    }

    if skipped > 0 {
        warn!(dimension, skipped, "columns skipped by the approximation limit");
    }
    debug!(
        dimension,
        columns = outcomes.len(),
        pivots = reduced.len(),
        "reduced boundary matrix"
    );
    Reduction {
        dimension,
        outcomes,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagser_complex::enumerate_complex;
    use flagser_core::params::ResourceLimits;
    use flagser_graph::{EdgeList, FilteredDigraph, FlagGraph};

    fn square_edges(field: u32) -> Reduction {
        let graph = FlagGraph::new(
            vec![0.0; 4],
            EdgeList::Unweighted(vec![(0, 1), (1, 2), (2, 3), (0, 3)]),
        )
        .unwrap();
        let digraph = FilteredDigraph::build(&graph, false, None).unwrap();
        let complex = enumerate_complex(&digraph, None, &ResourceLimits::default()).unwrap();
        let field = PrimeField::new(field).unwrap();
        let arenas = complex.arenas();
        let matrix = BoundaryMatrix::build(&arenas[1], &arenas[0], &field).unwrap();
        reduce(matrix, &field, Approximation::Exact)
    }

    #[test]
    fn square_has_one_cycle_in_any_characteristic() {
        for p in [2, 3, 7] {
            let reduction = square_edges(p);
            let cycles = reduction
                .outcomes()
                .iter()
                .filter(|outcome| **outcome == ColumnOutcome::Cycle)
                .count();
            assert_eq!(cycles, 1, "p = {p}");
            assert_eq!(reduction.pivots().count(), 3);
            assert_eq!(reduction.skipped(), 0);
        }
    }

    #[test]
    fn pivots_are_unique() {
        let reduction = square_edges(5);
        let mut rows: Vec<usize> = reduction.pivots().map(|(row, _)| row).collect();
        rows.sort_unstable();
        rows.dedup();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn tight_limit_skips_columns() {
        let graph = FlagGraph::new(vec![0.0; 3], EdgeList::Unweighted(vec![(0, 1), (1, 2)]))
            .unwrap();
        let digraph = FilteredDigraph::build(&graph, true, None).unwrap();
        let complex = enumerate_complex(&digraph, None, &ResourceLimits::default()).unwrap();
        let field = PrimeField::new(2).unwrap();
        let arenas = complex.arenas();
        let matrix = BoundaryMatrix::build(&arenas[1], &arenas[0], &field).unwrap();
        let reduction = reduce(matrix, &field, Approximation::Bounded(1));
        assert_eq!(reduction.skipped(), 2);
        assert!(reduction
            .outcomes()
            .iter()
            .all(|outcome| *outcome == ColumnOutcome::Skipped));
    }
}
