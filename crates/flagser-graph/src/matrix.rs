//! Dense and sparse (coordinate) adjacency matrix representations.
//!
//! Diagonal cells carry vertex weights. Off-diagonal cells carry edges, and the
//! way absent edges are expressed differs between the two layouts: every dense
//! cell is a declared value, while a sparse matrix only declares the entries
//! it stores.

use flagser_core::errors::{ErrorInfo, FlagserError};

/// Presence of an edge as declared by a matrix cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePresence {
    /// No edge.
    Absent,
    /// An edge without a weight of its own.
    Present,
    /// An edge appearing at the given filtration value.
    PresentWithWeight(f64),
}

/// Scalar types accepted as matrix cells.
pub trait MatrixEntry: Copy + Send + Sync + 'static {
    /// Whether off-diagonal values carry edge weights.
    const WEIGHTED: bool;

    /// Name used in diagnostics.
    const DTYPE: &'static str;

    /// Interprets a diagonal cell as a vertex weight.
    fn vertex_weight(self) -> f64;

    /// Interprets an off-diagonal cell that is declared by the matrix.
    fn edge(self) -> EdgePresence;
}

macro_rules! weighted_entry {
    ($ty:ty, $name:literal) => {
        impl MatrixEntry for $ty {
            const WEIGHTED: bool = true;
            const DTYPE: &'static str = $name;

            fn vertex_weight(self) -> f64 {
                self as f64
            }

            fn edge(self) -> EdgePresence {
                let weight = self as f64;
                if weight == f64::INFINITY {
                    EdgePresence::Absent
                } else {
                    EdgePresence::PresentWithWeight(weight)
                }
            }
        }
    };
}

weighted_entry!(f64, "float64");
weighted_entry!(f32, "float32");
weighted_entry!(i64, "int64");
weighted_entry!(i32, "int32");
weighted_entry!(u32, "uint32");
weighted_entry!(u8, "uint8");

impl MatrixEntry for bool {
    const WEIGHTED: bool = false;
    const DTYPE: &'static str = "bool";

    fn vertex_weight(self) -> f64 {
        0.0
    }

    fn edge(self) -> EdgePresence {
        if self {
            EdgePresence::Present
        } else {
            EdgePresence::Absent
        }
    }
}

/// Row-major dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: MatrixEntry> DenseMatrix<T> {
    /// Wraps row-major data, checking that it matches the declared shape.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, FlagserError> {
        let expected = rows.checked_mul(cols).ok_or_else(|| shape_error(rows, cols))?;
        if data.len() != expected {
            return Err(FlagserError::InvalidInput(
                ErrorInfo::new("shape-mismatch", "data length does not match matrix shape")
                    .with_context("rows", rows.to_string())
                    .with_context("cols", cols.to_string())
                    .with_context("len", data.len().to_string()),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, FlagserError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
            return Err(FlagserError::InvalidInput(
                ErrorInfo::new("ragged-rows", "every row must have the same length")
                    .with_context("row", idx.to_string())
                    .with_context("len", row.len().to_string())
                    .with_context("expected", n_cols.to_string()),
            ));
        }
        Self::new(n_rows, n_cols, rows.into_iter().flatten().collect())
    }

    /// Creates an `n x n` matrix with every cell set to `fill`.
    pub fn filled(n: usize, fill: T) -> Self {
        Self {
            rows: n,
            cols: n,
            data: vec![fill; n * n],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value stored at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// Overwrites the value at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), FlagserError> {
        if row >= self.rows || col >= self.cols {
            return Err(out_of_bounds(row, col, self.rows, self.cols));
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Iterates over `(row, col, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, value)| (idx / self.cols, idx % self.cols, *value))
    }
}

/// Coordinate-format sparse matrix. Cells that are never stored are absent edges.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    rows: usize,
    cols: usize,
    entries: Vec<(usize, usize, T)>,
}

impl<T: MatrixEntry> SparseMatrix<T> {
    /// Creates an empty sparse matrix of the given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    /// Builds a sparse matrix from `(row, col, value)` triplets.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> Result<Self, FlagserError> {
        let mut matrix = Self::new(rows, cols);
        for (row, col, value) in triplets {
            matrix.push(row, col, value)?;
        }
        Ok(matrix)
    }

    /// Stores an explicit entry, including explicit zeros.
    pub fn push(&mut self, row: usize, col: usize, value: T) -> Result<(), FlagserError> {
        if row >= self.rows || col >= self.cols {
            return Err(out_of_bounds(row, col, self.rows, self.cols));
        }
        self.entries.push((row, col, value));
        Ok(())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Stored entries in insertion order.
    pub fn entries(&self) -> &[(usize, usize, T)] {
        &self.entries
    }
}

/// Adjacency matrix in either layout.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagMatrix<T> {
    /// Every off-diagonal cell is declared.
    Dense(DenseMatrix<T>),
    /// Only stored off-diagonal cells are declared.
    Sparse(SparseMatrix<T>),
}

impl<T: MatrixEntry> FlagMatrix<T> {
    /// Matrix shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            FlagMatrix::Dense(m) => (m.rows(), m.cols()),
            FlagMatrix::Sparse(m) => (m.rows(), m.cols()),
        }
    }
}

impl<T> From<DenseMatrix<T>> for FlagMatrix<T> {
    fn from(value: DenseMatrix<T>) -> Self {
        FlagMatrix::Dense(value)
    }
}

impl<T> From<SparseMatrix<T>> for FlagMatrix<T> {
    fn from(value: SparseMatrix<T>) -> Self {
        FlagMatrix::Sparse(value)
    }
}

fn shape_error(rows: usize, cols: usize) -> FlagserError {
    FlagserError::InvalidInput(
        ErrorInfo::new("shape-overflow", "matrix shape overflows the address space")
            .with_context("rows", rows.to_string())
            .with_context("cols", cols.to_string()),
    )
}

fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> FlagserError {
    FlagserError::InvalidInput(
        ErrorInfo::new("index-out-of-bounds", "entry lies outside the matrix")
            .with_context("row", row.to_string())
            .with_context("col", col.to_string())
            .with_context("shape", format!("{rows}x{cols}")),
    )
}
