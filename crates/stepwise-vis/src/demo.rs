//! Demo presets.
//!
//! Randomness is confined to generating input arrays from an explicit seed;
//! the traced algorithms themselves are deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::algorithm::AlgorithmId;

/// Seed used when the caller asks for a random array without one.
pub const DEMO_SEED: u64 = 0x5EED;

/// `len` integers in `1..=99` drawn from a seeded generator.
///
/// The same `(len, seed)` always yields the same array.
pub fn random_array(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(1..=99)).collect()
}

/// Parameters that produce a representative trace for `id`.
pub fn demo_params(id: AlgorithmId) -> Value {
    match id {
        AlgorithmId::BubbleSort | AlgorithmId::InsertionSort | AlgorithmId::QuickSort => {
            json!({ "array": [5, 2, 8, 1, 9, 3] })
        }
        AlgorithmId::Bfs | AlgorithmId::Dfs | AlgorithmId::Dijkstra => {
            json!({ "start": "A", "goal": "F" })
        }
        AlgorithmId::Kruskal => json!({}),
        AlgorithmId::Fcfs | AlgorithmId::Sstf => {
            json!({ "requests": [98, 183, 37, 122, 14, 124, 65, 67], "head": 53, "track_count": 200 })
        }
        AlgorithmId::Scan | AlgorithmId::Look | AlgorithmId::CScan | AlgorithmId::CLook => json!({
            "requests": [98, 183, 37, 122, 14, 124, 65, 67],
            "head": 53,
            "track_count": 200,
            "direction": "up"
        }),
        AlgorithmId::Factorial => json!({ "n": 5 }),
        AlgorithmId::Fibonacci => json!({ "n": 5 }),
        AlgorithmId::BinarySearch => json!({ "target": 13 }),
        AlgorithmId::Queue => json!({
            "ops": [
                { "op": "enqueue", "value": 10 },
                { "op": "enqueue", "value": 20 },
                { "op": "dequeue" },
                { "op": "enqueue", "value": 30 },
                { "op": "enqueue", "value": 40 },
                { "op": "enqueue", "value": 50 },
                { "op": "dequeue" }
            ],
            "capacity": 3
        }),
        AlgorithmId::Stack => json!({
            "ops": [
                { "op": "push", "value": 1 },
                { "op": "push", "value": 2 },
                { "op": "push", "value": 3 },
                { "op": "pop" },
                { "op": "push", "value": 4 },
                { "op": "pop" },
                { "op": "pop" },
                { "op": "pop" },
                { "op": "pop" }
            ]
        }),
        AlgorithmId::Bst => json!({ "keys": [50, 30, 70, 20, 40, 60, 80, 30] }),
        AlgorithmId::SegmentTree => json!({ "array": [2, 1, 5, 3, 4, 7], "left": 1, "right": 4 }),
        AlgorithmId::Encapsulation => json!({
            "message": "GET /index.html HTTP/1.1",
            "scenario": {
                "application": "HTTP",
                "source_ip": "192.168.1.10",
                "destination_ip": "93.184.216.34",
                "source_mac": "3c:22:fb:10:4a:01",
                "destination_mac": "00:1a:2b:3c:4d:5e",
                "source_port": 49152,
                "destination_port": 80,
                "transport": "tcp",
                "compression": true,
                "encryption": true,
                "encryption_key": 7,
                "session": "stateful"
            }
        }),
    }
}
