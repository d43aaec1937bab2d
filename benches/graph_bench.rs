use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::io::Cursor;
use taxgraph::bio::taxonomy::loader;
use taxgraph::{AncestryGraph, TaxonId};

const LEVELS: &[&str] = &[
    "superkingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "species",
    "no rank",
];

/// Balanced taxonomy with `fanout` children per node below the root
fn generate_nodes_dmp(fanout: u32) -> (String, Vec<TaxonId>) {
    let mut content = String::from("1\t|\t1\t|\tno rank\t|\n");
    let mut level_nodes = vec![1];
    let mut next_id = 2;

    for rank in LEVELS {
        let mut next_level = Vec::with_capacity(level_nodes.len() * fanout as usize);
        for parent in &level_nodes {
            for _ in 0..fanout {
                content.push_str(&format!("{}\t|\t{}\t|\t{}\t|\n", next_id, parent, rank));
                next_level.push(next_id);
                next_id += 1;
            }
        }
        level_nodes = next_level;
    }

    (content, level_nodes)
}

fn build_graph(fanout: u32) -> (AncestryGraph, Vec<TaxonId>) {
    let (content, leaves) = generate_nodes_dmp(fanout);
    let graph = loader::load_from_readers(Cursor::new(content), None::<Cursor<String>>).unwrap();
    (graph, leaves)
}

fn bench_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("taxonomy/load");

    for fanout in [3u32, 4].iter() {
        let (content, _) = generate_nodes_dmp(*fanout);

        group.bench_with_input(BenchmarkId::from_parameter(fanout), fanout, |b, _| {
            b.iter(|| {
                let graph =
                    loader::load_from_readers(Cursor::new(content.as_str()), None::<Cursor<&str>>)
                        .unwrap();
                black_box(graph);
            });
        });
    }

    group.finish();
}

fn bench_descendants(c: &mut Criterion) {
    let mut group = c.benchmark_group("taxonomy/descendants");
    let (graph, _) = build_graph(4);

    group.bench_function("root", |b| {
        b.iter(|| black_box(graph.find_descendants(black_box(1), false)));
    });
    group.bench_function("root_species_only", |b| {
        b.iter(|| black_box(graph.find_descendants(black_box(1), true)));
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("taxonomy/normalize");
    let (graph, leaves) = build_graph(4);

    for rank in ["species", "family", "phylum"].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(rank), rank, |b, rank| {
            b.iter(|| {
                for leaf in leaves.iter().step_by(97) {
                    black_box(graph.normalize_to_rank(*leaf, rank).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_common_ancestor(c: &mut Criterion) {
    let mut group = c.benchmark_group("taxonomy/common_ancestor");
    let (graph, leaves) = build_graph(4);

    for count in [2usize, 16, 256].iter() {
        let step = leaves.len() / count;
        let taxa: Vec<TaxonId> = leaves.iter().step_by(step).take(*count).copied().collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &taxa, |b, taxa| {
            b.iter(|| black_box(graph.find_common_ancestor(taxa).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_loading,
    bench_descendants,
    bench_normalize,
    bench_common_ancestor
);
criterion_main!(benches);
