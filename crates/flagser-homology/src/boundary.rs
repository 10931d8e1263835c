//! Boundary matrices of a filtered flag complex.

use flagser_complex::SimplexArena;
use flagser_core::errors::{ErrorInfo, FlagserError};

use crate::column::SparseColumn;
use crate::field::PrimeField;

/// Boundary matrix `∂_k` with one column per `k`-simplex and one row per
/// `(k-1)`-simplex, both in filtration order.
#[derive(Debug, Clone)]
pub struct BoundaryMatrix {
    dimension: usize,
    rows: usize,
    columns: Vec<SparseColumn>,
}

impl BoundaryMatrix {
    /// Builds `∂_k` where `cells` holds the `k`-simplices and `faces` the `(k-1)`-simplices.
    ///
    /// Removing the `i`-th vertex of a simplex contributes `(-1)^i`.
    pub fn build(
        cells: &SimplexArena,
        faces: &SimplexArena,
        field: &PrimeField,
    ) -> Result<Self, FlagserError> {
        let dimension = cells.dimension();
        if dimension == 0 || faces.dimension() + 1 != dimension {
            return Err(FlagserError::InvalidParameter(
                ErrorInfo::new("boundary-dimension", "faces must sit one dimension below cells")
                    .with_parameter("dimension", dimension)
                    .with_context("face_dimension", faces.dimension().to_string()),
            ));
        }

        let mut columns = Vec::with_capacity(cells.len());
        let mut face = Vec::with_capacity(dimension);
        for simplex in cells.simplices() {
            let mut entries = Vec::with_capacity(simplex.len());
            for removed in 0..simplex.len() {
                face.clear();
                face.extend(
                    simplex
                        .iter()
                        .enumerate()
                        .filter(|&(position, _)| position != removed)
                        .map(|(_, &vertex)| vertex),
                );
                let row = faces.position(&face).ok_or_else(|| {
                    FlagserError::InvalidInput(
                        ErrorInfo::new("missing-face", "simplex has a face outside the complex")
                            .with_context("simplex", format!("{simplex:?}"))
                            .with_context("face", format!("{face:?}")),
                    )
                })?;
                entries.push((row, field.sign(removed)));
            }
            columns.push(SparseColumn::from_entries(entries));
        }

        Ok(Self {
            dimension,
            rows: faces.len(),
            columns,
        })
    }

    /// Dimension `k` of the boundary map.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of rows, i.e. `(k-1)`-simplices.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, i.e. `k`-simplices.
    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// Column of a given simplex.
    pub fn column(&self, index: usize) -> &SparseColumn {
        &self.columns[index]
    }

    pub(crate) fn into_columns(self) -> Vec<SparseColumn> {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagser_complex::enumerate_complex;
    use flagser_core::params::ResourceLimits;
    use flagser_graph::{EdgeList, FilteredDigraph, FlagGraph};

    #[test]
    fn triangle_boundary_has_alternating_signs() {
        let graph = FlagGraph::new(
            vec![0.0; 3],
            EdgeList::Unweighted(vec![(0, 1), (1, 2), (0, 2)]),
        )
        .unwrap();
        let digraph = FilteredDigraph::build(&graph, true, None).unwrap();
        let complex = enumerate_complex(&digraph, None, &ResourceLimits::default()).unwrap();
        let field = PrimeField::new(3).unwrap();
        let arenas = complex.arenas();

        let matrix = BoundaryMatrix::build(&arenas[2], &arenas[1], &field).unwrap();
        assert_eq!(matrix.dimension(), 2);
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 1);

        let edge = |s: usize, t: usize| arenas[1].position(&[s, t]).unwrap();
        let mut expected = vec![(edge(1, 2), 1), (edge(0, 2), 2), (edge(0, 1), 1)];
        expected.sort_unstable();
        assert_eq!(matrix.column(0).entries(), expected.as_slice());
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let field = PrimeField::new(2).unwrap();
        let err = BoundaryMatrix::build(&SimplexArena::new(2), &SimplexArena::new(0), &field)
            .unwrap_err();
        assert_eq!(err.code(), "boundary-dimension");
    }
}
