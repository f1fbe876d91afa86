//! Parameter shapes accepted by [`build_trace`](crate::build_trace).
//!
//! Every struct here, and the request, graph and scenario types they embed,
//! rejects unknown fields so a typo fails loudly instead of silently falling
//! back to a default.

use serde::{Deserialize, Serialize};
use stepwise_disk::DiskRequest;
use stepwise_graph::Graph;
use stepwise_protocol::Scenario;
use stepwise_structures::{QueueOp, StackOp};
use stepwise_trace::Result;

/// An integer array given either as a JSON list or as text like `"3, 1 2"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArrayInput {
    List(Vec<i64>),
    Text(String),
}

impl ArrayInput {
    pub fn values(&self) -> Result<Vec<i64>> {
        match self {
            ArrayInput::List(values) => Ok(values.clone()),
            ArrayInput::Text(text) => stepwise_sorting::parse_array(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortParams {
    pub array: ArrayInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphParams {
    /// Defaults to the six-node demo graph.
    #[serde(default = "stepwise_graph::demo_graph")]
    pub graph: Graph,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

/// Disk parameters are the request batch itself.
pub type DiskParams = DiskRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountParams {
    pub n: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchParams {
    #[serde(default = "default_search_array")]
    pub array: Vec<i64>,
    pub target: i64,
}

fn default_search_array() -> Vec<i64> {
    stepwise_recursion::DEFAULT_SEARCH_ARRAY.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueParams {
    pub ops: Vec<QueueOp>,
    #[serde(default)]
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackParams {
    pub ops: Vec<StackOp>,
    #[serde(default)]
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BstParams {
    pub keys: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentTreeParams {
    pub array: Vec<i64>,
    /// Inclusive query bounds.
    pub left: usize,
    pub right: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncapsulationParams {
    #[serde(default)]
    pub scenario: Scenario,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_accepts_list_or_text() {
        let list: SortParams = serde_json::from_value(json!({ "array": [3, 1, 2] })).unwrap();
        let text: SortParams = serde_json::from_value(json!({ "array": "3, 1 2" })).unwrap();
        assert_eq!(list.array.values().unwrap(), text.array.values().unwrap());
    }

    #[test]
    fn bad_text_array_is_an_input_error() {
        let params: SortParams = serde_json::from_value(json!({ "array": "3, x" })).unwrap();
        assert!(params.array.values().unwrap_err().is_input_error());
    }

    #[test]
    fn graph_defaults_to_demo() {
        let params: GraphParams = serde_json::from_value(json!({ "start": "A" })).unwrap();
        assert_eq!(params.graph, stepwise_graph::demo_graph());
        assert_eq!(params.goal, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_value::<BstParams>(json!({ "keys": [], "kyes": [] })).is_err());
    }

    #[test]
    fn unknown_fields_in_embedded_types_are_rejected() {
        let disk = json!({ "requests": [1], "head": 0, "directon": "down" });
        assert!(serde_json::from_value::<DiskParams>(disk).is_err());

        let graph = json!({ "graph": { "nodes": ["A"], "edges": [], "directed": true } });
        assert!(serde_json::from_value::<GraphParams>(graph).is_err());

        let edge = json!({ "graph": { "nodes": ["A", "B"], "edges": [{ "from": "A", "to": "B", "wieght": 3 }] } });
        assert!(serde_json::from_value::<GraphParams>(edge).is_err());

        let mut scenario = serde_json::to_value(Scenario::default()).unwrap();
        scenario["compresion"] = json!(true);
        let params = json!({ "scenario": scenario, "message": "hi" });
        assert!(serde_json::from_value::<EncapsulationParams>(params).is_err());
    }

    #[test]
    fn search_defaults_to_fixed_array() {
        let params: SearchParams = serde_json::from_value(json!({ "target": 7 })).unwrap();
        assert_eq!(params.array.len(), 10);
    }
}
