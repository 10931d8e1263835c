use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flagser_graph::{
    extract_graph, gen_erdos_renyi, weighted_matrix, FilteredDigraph, IngestOptions, Layout,
};

fn ingest_bench(c: &mut Criterion) {
    let graph = gen_erdos_renyi(400, 0.1, true, 42).unwrap();
    let dense = weighted_matrix(&graph, Layout::Dense).unwrap();
    let sparse = weighted_matrix(&graph, Layout::Sparse).unwrap();
    let opts = IngestOptions::default();

    c.bench_function("ingest_dense_400", |b| {
        b.iter(|| black_box(extract_graph(&dense, &opts).unwrap()));
    });
    c.bench_function("ingest_sparse_400", |b| {
        b.iter(|| black_box(extract_graph(&sparse, &opts).unwrap()));
    });
    c.bench_function("digraph_400", |b| {
        b.iter(|| black_box(FilteredDigraph::build(&graph, true, None).unwrap()));
    });
}

criterion_group!(benches, ingest_bench);
criterion_main!(benches);
