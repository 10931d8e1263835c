//! Assignment of filtration values to every simplex.
//!
//! Vertices keep their vertex weight. Edges keep their edge value except for
//! `zero`, `dimension` and `vertex_degree`. Higher simplices are computed from
//! the values of their boundary faces, which are looked up in the arena of the
//! dimension below. Face monotonicity of the result is the caller's concern
//! and is not checked.

use flagser_core::errors::{ErrorInfo, FlagserError};
use flagser_core::filtration::{FiltrationKind, FiltrationOptions};
use flagser_graph::FilteredDigraph;
use tracing::{debug, info_span};

use crate::arena::SimplexArena;
use crate::enumerate::FlagComplex;

/// Highest dimension for which `max3` reads edge values directly.
const MAX3_LOOKBACK: usize = 3;

/// Assigns filtration values to every simplex and sorts each arena by them.
pub fn assign_filtration(
    complex: &mut FlagComplex,
    digraph: &FilteredDigraph,
    kind: FiltrationKind,
    options: &FiltrationOptions,
) -> Result<(), FlagserError> {
    let _span = info_span!("filtration", filtration = %kind).entered();
    let arenas = complex.arenas_mut();
    for dimension in 0..arenas.len() {
        let (lower, upper) = arenas.split_at_mut(dimension);
        let arena = &mut upper[0];
        let values = match dimension {
            0 => arena
                .simplices()
                .map(|simplex| digraph.vertex_filtration(simplex[0]))
                .collect(),
            1 => edge_values(arena, digraph, kind)?,
            _ => higher_values(arena, &lower[dimension - 1], digraph, kind, options)?,
        };
        arena.set_filtration(values);
        arena.sort_by_filtration();
    }
    debug!(dimensions = arenas.len(), "assigned filtration values");
    Ok(())
}

fn edge_values(
    arena: &SimplexArena,
    digraph: &FilteredDigraph,
    kind: FiltrationKind,
) -> Result<Vec<f64>, FlagserError> {
    arena
        .simplices()
        .map(|edge| {
            let (source, target) = (edge[0], edge[1]);
            match kind {
                FiltrationKind::Zero => Ok(0.0),
                FiltrationKind::Dimension => Ok(1.0),
                FiltrationKind::VertexDegree => Ok(max_degree(edge, digraph)),
                _ => digraph.edge_filtration(source, target).ok_or_else(|| {
                    FlagserError::InvalidInput(
                        ErrorInfo::new("missing-edge", "edge has no filtration value")
                            .with_context("edge", format!("({source}, {target})")),
                    )
                }),
            }
        })
        .collect()
}

fn higher_values(
    arena: &SimplexArena,
    faces: &SimplexArena,
    digraph: &FilteredDigraph,
    kind: FiltrationKind,
    options: &FiltrationOptions,
) -> Result<Vec<f64>, FlagserError> {
    let dimension = arena.dimension();
    let mut boundary = Vec::with_capacity(dimension + 1);
    let mut face = Vec::with_capacity(dimension);
    let mut values = Vec::with_capacity(arena.len());
    for simplex in arena.simplices() {
        boundary.clear();
        for skip in 0..simplex.len() {
            face.clear();
            face.extend(
                simplex
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != skip)
                    .map(|(_, vertex)| *vertex),
            );
            let position = faces.position(&face).ok_or_else(|| missing_face(&face))?;
            boundary.push(faces.filtration(position));
        }
        let value = combine(kind, options, dimension, simplex, &boundary, digraph);
        if !value.is_finite() {
            return Err(FlagserError::ArithmeticOverflow(
                ErrorInfo::new("non-finite-filtration", "filtration value is not finite")
                    .with_parameter("filtration", kind)
                    .with_context("simplex", format!("{simplex:?}"))
                    .with_context("result", value.to_string()),
            ));
        }
        values.push(value);
    }
    Ok(values)
}

fn combine(
    kind: FiltrationKind,
    options: &FiltrationOptions,
    dimension: usize,
    simplex: &[usize],
    boundary: &[f64],
    digraph: &FilteredDigraph,
) -> f64 {
    let count = boundary.len() as f64;
    let max = || boundary.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    match kind {
        FiltrationKind::Zero => 0.0,
        FiltrationKind::Dimension => dimension as f64,
        FiltrationKind::Max | FiltrationKind::RemoveEdges => max(),
        FiltrationKind::Max3 if dimension <= MAX3_LOOKBACK => max_edge(simplex, digraph),
        FiltrationKind::Max3 => max(),
        FiltrationKind::MaxPlusOne => max() + 1.0,
        FiltrationKind::Product => boundary.iter().product(),
        FiltrationKind::Sum => boundary.iter().sum(),
        FiltrationKind::Pmean => {
            let moment = boundary.iter().map(|b| b.powf(options.exponent)).sum::<f64>() / count;
            moment.powf(options.exponent.recip())
        }
        FiltrationKind::Pmoment => {
            boundary.iter().map(|b| b.powf(options.exponent)).sum::<f64>() / count
        }
        FiltrationKind::VertexDegree => max_degree(simplex, digraph),
    }
}

fn max_edge(simplex: &[usize], digraph: &FilteredDigraph) -> f64 {
    let mut value = f64::NEG_INFINITY;
    for (i, &source) in simplex.iter().enumerate() {
        for &target in &simplex[i + 1..] {
            if let Some(w) = digraph.edge_filtration(source, target) {
                value = value.max(w);
            }
        }
    }
    value
}

fn max_degree(simplex: &[usize], digraph: &FilteredDigraph) -> f64 {
    simplex
        .iter()
        .map(|&vertex| digraph.degree(vertex))
        .max()
        .unwrap_or(0) as f64
}

fn missing_face(face: &[usize]) -> FlagserError {
    FlagserError::InvalidInput(
        ErrorInfo::new("missing-face", "boundary face was not enumerated")
            .with_context("face", format!("{face:?}")),
    )
}
