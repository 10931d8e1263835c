//! End-to-end persistent homology of a flag complex.

use flagser_complex::{
    assign_filtration, count_simplices, enumerate_complex, euler_characteristic, SimplexArena,
};
use flagser_core::errors::FlagserError;
use flagser_core::params::{DimensionBound, FlagserParams};
use flagser_core::result::{
    DimensionSummary, HomologyResult, PersistenceDiagram, PersistencePair,
};
use flagser_graph::{extract_graph, FilteredDigraph, FlagGraph, FlagMatrix, IngestOptions, MatrixEntry};
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use crate::boundary::BoundaryMatrix;
use crate::field::PrimeField;
use crate::reduction::{reduce, ColumnOutcome, Reduction};

/// Computes persistence diagrams, Betti numbers, cell counts and the Euler
/// characteristic of the flag complex of `graph`.
///
/// Boundary matrices of different dimensions are reduced in parallel on the
/// current rayon pool.
pub fn compute_homology(
    graph: &FlagGraph,
    params: &FlagserParams,
) -> Result<HomologyResult, FlagserError> {
    let _span = info_span!(
        "compute_homology",
        vertices = graph.num_vertices(),
        edges = graph.num_edges(),
        filtration = %params.filtration
    )
    .entered();
    params.validate()?;
    let field = PrimeField::new(params.coeff)?;

    let prune = params
        .filtration
        .prunes_edges()
        .then_some(params.filtration_options.edge_threshold);
    let digraph = FilteredDigraph::build(graph, params.directed, prune)?;

    let mut complex = enumerate_complex(&digraph, params.enumeration_limit(), &params.limits)?;
    assign_filtration(
        &mut complex,
        &digraph,
        params.filtration,
        &params.filtration_options,
    )?;

    let euler = if complex.is_truncated() {
        euler_characteristic(&count_simplices(&digraph, None))
    } else {
        euler_characteristic(&complex.cell_counts())
    };

    let min = params.min_dimension;
    // No simplex has as many dimensions as the graph has vertices.
    let ceiling = graph.num_vertices().max(min);
    let last = match params.max_dimension {
        DimensionBound::AtMost(max) => max.min(ceiling),
        DimensionBound::Unbounded => complex.top_dimension().unwrap_or(0).max(min),
    };
    let arenas = complex.into_arenas();

    let reductions = reduce_all(&arenas, min.max(1), last.saturating_add(1), &field, params)?;
    let reduction_of = |k: usize| reductions.iter().find(|r| r.dimension() == k);

    let dimensions: Vec<DimensionSummary> = (min..=last)
        .map(|d| {
            let coboundary = d.checked_add(1).and_then(reduction_of);
            summarize(d, &arenas, reduction_of(d), coboundary)
        })
        .collect();

    let skipped: usize = reductions.iter().map(Reduction::skipped).sum();
    if skipped > 0 {
        warn!(skipped, "result is approximate");
    }
    info!(
        dimensions = dimensions.len(),
        euler,
        "persistent homology computed"
    );
    Ok(HomologyResult {
        dimensions,
        euler_characteristic: euler,
        approximate: skipped > 0,
    })
}

/// Extracts the graph of an adjacency matrix and computes its homology.
pub fn compute_homology_from_matrix<T: MatrixEntry>(
    matrix: &FlagMatrix<T>,
    ingest: &IngestOptions,
    params: &FlagserParams,
) -> Result<HomologyResult, FlagserError> {
    let graph = extract_graph(matrix, ingest)?;
    compute_homology(&graph, params)
}

/// Counts the cells of every dimension of the flag complex without storing them.
///
/// Trailing dimensions are omitted; a graph without vertices yields an empty list.
pub fn count_cells(graph: &FlagGraph, directed: bool) -> Result<Vec<u64>, FlagserError> {
    let digraph = FilteredDigraph::build(graph, directed, None)?;
    Ok(count_simplices(&digraph, None))
}

fn reduce_all(
    arenas: &[SimplexArena],
    from: usize,
    to: usize,
    field: &PrimeField,
    params: &FlagserParams,
) -> Result<Vec<Reduction>, FlagserError> {
    let to = to.min(arenas.len().saturating_sub(1));
    let dims: Vec<usize> = (from..=to)
        .filter(|&k| arenas.get(k).is_some_and(|arena| !arena.is_empty()))
        .collect();
    debug!(?dims, threads = rayon::current_num_threads(), "reducing boundary matrices");
    dims.into_par_iter()
        .map(|k| {
            let matrix = BoundaryMatrix::build(&arenas[k], &arenas[k - 1], field)?;
            Ok(reduce(matrix, field, params.approximation))
        })
        .collect()
}

fn summarize(
    dimension: usize,
    arenas: &[SimplexArena],
    boundary: Option<&Reduction>,
    coboundary: Option<&Reduction>,
) -> DimensionSummary {
    let Some(arena) = arenas.get(dimension).filter(|arena| !arena.is_empty()) else {
        return DimensionSummary {
            dimension,
            cell_count: 0,
            betti: 0,
            diagram: PersistenceDiagram::default(),
        };
    };

    let mut cycle: Vec<bool> = match boundary {
        Some(reduction) => reduction
            .outcomes()
            .iter()
            .map(|outcome| *outcome == ColumnOutcome::Cycle)
            .collect(),
        None => vec![dimension == 0; arena.len()],
    };

    let mut pairs = Vec::new();
    if let Some(reduction) = coboundary {
        let deaths = &arenas[dimension + 1];
        for (row, column) in reduction.pivots() {
            cycle[row] = false;
            let birth = arena.filtration(row);
            let death = deaths.filtration(column);
            if death > birth {
                pairs.push(PersistencePair::finite(birth, death));
            }
        }
    }

    let mut betti = 0u64;
    for (position, _) in cycle.iter().enumerate().filter(|(_, alive)| **alive) {
        pairs.push(PersistencePair::essential(arena.filtration(position)));
        betti += 1;
    }

    DimensionSummary {
        dimension,
        cell_count: arena.len() as u64,
        betti,
        diagram: PersistenceDiagram { pairs },
    }
}
