//! Benchmarks for graph tracers
//!
//! Measures trace construction over grid graphs of increasing size:
//! - BFS to the far corner
//! - Dijkstra over the whole grid
//! - Kruskal spanning tree

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stepwise_graph::{bfs, dijkstra, kruskal, Edge, Graph};

/// Square grid with weights varying by position.
fn grid(side: usize) -> Graph {
    let name = |r: usize, c: usize| format!("r{:02}c{:02}", r, c);
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for r in 0..side {
        for c in 0..side {
            nodes.push(name(r, c));
            if c + 1 < side {
                edges.push(Edge::new(name(r, c), name(r, c + 1), ((r * 7 + c * 3) % 9 + 1) as u64));
            }
            if r + 1 < side {
                edges.push(Edge::new(name(r, c), name(r + 1, c), ((r * 5 + c) % 7 + 1) as u64));
            }
        }
    }
    Graph::new(nodes, edges)
}

fn bench_bfs(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs");
    for &side in &[4usize, 8, 16] {
        let graph = grid(side);
        let goal = graph.nodes[graph.nodes.len() - 1].clone();
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side), &graph, |b, g| {
            b.iter(|| bfs(black_box(g), "r00c00", Some(&goal)))
        });
    }
    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    for &side in &[4usize, 8, 16] {
        let graph = grid(side);
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side), &graph, |b, g| {
            b.iter(|| dijkstra(black_box(g), "r00c00", None))
        });
    }
    group.finish();
}

fn bench_kruskal(c: &mut Criterion) {
    let mut group = c.benchmark_group("kruskal");
    for &side in &[4usize, 8, 16] {
        let graph = grid(side);
        group.throughput(Throughput::Elements(graph.edges.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side), &graph, |b, g| {
            b.iter(|| kruskal(black_box(g)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bfs, bench_dijkstra, bench_kruskal);
criterion_main!(benches);
