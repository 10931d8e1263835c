use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flagser_core::params::FlagserParams;
use flagser_graph::gen_erdos_renyi;
use flagser_homology::compute_homology;

fn homology_bench(c: &mut Criterion) {
    let graph = gen_erdos_renyi(60, 0.25, true, 7).unwrap();
    let params = FlagserParams::default();

    c.bench_function("homology_er_60", |b| {
        b.iter(|| black_box(compute_homology(&graph, &params).unwrap()));
    });

    let undirected = FlagserParams {
        directed: false,
        coeff: 3,
        ..FlagserParams::default()
    };
    c.bench_function("homology_er_60_undirected_mod3", |b| {
        b.iter(|| black_box(compute_homology(&graph, &undirected).unwrap()));
    });
}

criterion_group!(benches, homology_bench);
criterion_main!(benches);
