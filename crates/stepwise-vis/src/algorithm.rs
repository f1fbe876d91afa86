//! Algorithm identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stepwise_trace::TraceError;

/// Which tracer crate an algorithm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Sorting,
    Graph,
    Disk,
    Recursion,
    Structures,
    Protocol,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Sorting => "sorting",
            Family::Graph => "graph",
            Family::Disk => "disk scheduling",
            Family::Recursion => "recursion",
            Family::Structures => "data structures",
            Family::Protocol => "protocol",
        };
        f.write_str(name)
    }
}

macro_rules! algorithms {
    ($($variant:ident => $id:literal, $family:ident, $summary:literal;)+) => {
        /// Every traceable algorithm, addressed by a stable snake_case id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum AlgorithmId {
            $(#[serde(rename = $id)] $variant,)+
        }

        impl AlgorithmId {
            /// All algorithms in listing order.
            pub const ALL: &'static [AlgorithmId] = &[$(AlgorithmId::$variant,)+];

            /// Stable id, as accepted by [`FromStr`].
            pub fn as_str(self) -> &'static str {
                match self {
                    $(AlgorithmId::$variant => $id,)+
                }
            }

            pub fn family(self) -> Family {
                match self {
                    $(AlgorithmId::$variant => Family::$family,)+
                }
            }

            /// One-line description for listings.
            pub fn summary(self) -> &'static str {
                match self {
                    $(AlgorithmId::$variant => $summary,)+
                }
            }
        }

        impl FromStr for AlgorithmId {
            type Err = TraceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
                    $($id => Ok(AlgorithmId::$variant),)+
                    _ => Err(TraceError::UnknownAlgorithm(s.to_string())),
                }
            }
        }
    };
}

algorithms! {
    BubbleSort => "bubble_sort", Sorting, "Adjacent compare-and-swap passes";
    InsertionSort => "insertion_sort", Sorting, "Shift each key left into the sorted prefix";
    QuickSort => "quick_sort", Sorting, "Lomuto partition around the last element";
    Bfs => "bfs", Graph, "Breadth-first search with a FIFO frontier";
    Dfs => "dfs", Graph, "Depth-first search with a LIFO frontier";
    Dijkstra => "dijkstra", Graph, "Single-source shortest paths";
    Kruskal => "kruskal", Graph, "Minimum spanning tree with union-find";
    Fcfs => "fcfs", Disk, "First-come first-served head scheduling";
    Sstf => "sstf", Disk, "Shortest seek time first";
    Scan => "scan", Disk, "Elevator sweep to the disk edge";
    Look => "look", Disk, "Elevator sweep reversing at the last request";
    CScan => "c_scan", Disk, "Circular sweep with a return to the opposite edge";
    CLook => "c_look", Disk, "Circular sweep jumping to the farthest request";
    Factorial => "factorial", Recursion, "Recursive n!";
    Fibonacci => "fibonacci", Recursion, "Naive doubly recursive Fibonacci";
    BinarySearch => "binary_search", Recursion, "Recursive binary search over a sorted array";
    Queue => "queue", Structures, "Array queue with advancing front and rear";
    Stack => "stack", Structures, "Array stack with push and pop";
    Bst => "bst", Structures, "Unbalanced binary search tree insertion";
    SegmentTree => "segment_tree", Structures, "Sum segment tree build and range query";
    Encapsulation => "encapsulation", Protocol, "Seven-layer message encapsulation";
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
