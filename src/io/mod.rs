/*!
# IO

Conversion between graphs and a plain JSON exchange record:

```json
{
  "undirected": false,
  "unweighted": false,
  "nodes": [1, 2],
  "edges": [{ "source": 1, "target": 2, "value": 7 }]
}
```

Serialization needs nothing but the orientation flags and the edge
projection; parsing needs nothing but `insert` and `connect`. Round-tripping
a graph therefore preserves its node set and edge set exactly, while the
iteration order of hash-backed adjacency is not part of the format.

The core itself performs no file or network IO; this module only produces
and consumes strings and in-memory [`GraphJson`] records.
*/

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::{
    key::{GraphKey, KeyFn},
    repr::Graph,
};

/// The plain exchange record of a graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphJson<V, E> {
    pub undirected: bool,
    pub unweighted: bool,
    pub nodes: Vec<V>,
    pub edges: Vec<JsonEdge<V, E>>,
}

/// One edge of the exchange record. `value` is omitted for valueless edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize, E: Serialize",
    deserialize = "V: Deserialize<'de>, E: Deserialize<'de>"
))]
pub struct JsonEdge<V, E> {
    pub source: V,
    pub target: V,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<E>,
}

/// Errors produced when reading a graph from JSON.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The input is not valid JSON or does not match the exchange record.
    #[error("malformed graph json: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An edge references a node that is missing from the node list.
    #[error("edge endpoint `{key}` is not in the node list")]
    UnknownEndpoint { key: String },
}

/// Projects a graph onto its exchange record, borrowing nodes and values.
pub fn graph_json<V, E>(g: &Graph<V, E>) -> GraphJson<&V, &E> {
    GraphJson {
        undirected: g.is_undirected(),
        unweighted: g.is_unweighted(),
        nodes: g.nodes().collect(),
        edges: g
            .edges()
            .into_iter()
            .map(|e| JsonEdge { source: e.source, target: e.target, value: e.value })
            .collect(),
    }
}

/// Serializes a graph to a pretty-printed JSON string.
pub fn to_json<V, E>(g: &Graph<V, E>) -> Result<String, JsonError>
where
    V: Serialize,
    E: Serialize,
{
    Ok(serde_json::to_string_pretty(&graph_json(g))?)
}

/// Reads a graph from a JSON string using the default key function of `V`.
pub fn from_json<V, E>(json: &str) -> Result<Graph<V, E>, JsonError>
where
    V: DeserializeOwned + GraphKey,
    E: DeserializeOwned + Clone + PartialEq,
{
    from_json_with_key(json, crate::key::default_key_fn())
}

/// Reads a graph from a JSON string with an injected key function.
pub fn from_json_with_key<V, E>(json: &str, key_fn: KeyFn<V>) -> Result<Graph<V, E>, JsonError>
where
    V: DeserializeOwned,
    E: DeserializeOwned + Clone + PartialEq,
{
    let record: GraphJson<V, E> = serde_json::from_str(json)?;
    build_graph(record, key_fn)
}

fn build_graph<V, E>(record: GraphJson<V, E>, key_fn: KeyFn<V>) -> Result<Graph<V, E>, JsonError>
where
    E: Clone + PartialEq,
{
    let mut g = Graph::new_with_key(record.undirected, record.unweighted, key_fn);
    g.insert_all(record.nodes);

    for JsonEdge { source, target, value } in record.edges {
        for endpoint in [&source, &target] {
            if !g.contains(endpoint) {
                return Err(JsonError::UnknownEndpoint { key: g.key_of(endpoint) });
            }
        }
        match value {
            Some(value) => g.connect_with(&source, &target, value),
            None => g.connect(&source, &target),
        };
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn sample() -> Graph<String, i64> {
        let mut g = Graph::undirected();
        g.insert_all(["a", "b", "c"].map(String::from));
        g.connect_with(&"a".into(), &"b".into(), 3);
        g.connect(&"b".into(), &"c".into());
        g
    }

    fn edge_set(g: &Graph<String, i64>) -> Vec<(String, String, Option<i64>)> {
        g.edges()
            .into_iter()
            .map(|e| {
                let (a, b) = (e.source.clone(), e.target.clone());
                let (a, b) = if a <= b { (a, b) } else { (b, a) };
                (a, b, e.value.copied())
            })
            .sorted()
            .collect_vec()
    }

    #[test]
    fn round_trip_preserves_nodes_and_edges() {
        let g = sample();
        let json = to_json(&g).unwrap();
        let parsed: Graph<String, i64> = from_json(&json).unwrap();

        assert_eq!(parsed.is_undirected(), g.is_undirected());
        assert_eq!(parsed.is_unweighted(), g.is_unweighted());
        assert_eq!(
            parsed.nodes().sorted().collect_vec(),
            g.nodes().sorted().collect_vec()
        );
        assert_eq!(edge_set(&parsed), edge_set(&g));
    }

    #[test]
    fn values_survive_and_valueless_edges_stay_valueless() {
        let g = sample();
        let parsed: Graph<String, i64> = from_json(&to_json(&g).unwrap()).unwrap();

        assert_eq!(parsed.edge_value(&"a".into(), &"b".into()), Some(Some(&3)));
        assert_eq!(parsed.edge_value(&"b".into(), &"c".into()), Some(None));
    }

    #[test]
    fn unweighted_round_trip() {
        let mut g: Graph<u32, ()> = Graph::new(false, true);
        g.insert_all([1, 2]);
        g.connect(&1, &2);

        let parsed: Graph<u32, ()> = from_json(&to_json(&g).unwrap()).unwrap();
        assert!(parsed.is_unweighted());
        assert!(parsed.has_edge(&1, &2));
        assert!(!parsed.has_edge(&2, &1));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            from_json::<u32, ()>("{ not json"),
            Err(JsonError::Malformed(_))
        ));
        // Structurally valid JSON that is not a graph record.
        assert!(matches!(
            from_json::<u32, ()>(r#"{"nodes": []}"#),
            Err(JsonError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_endpoints_are_reported() {
        let json = r#"{
            "undirected": false,
            "unweighted": true,
            "nodes": [1],
            "edges": [{ "source": 1, "target": 2 }]
        }"#;
        assert!(matches!(
            from_json::<u32, ()>(json),
            Err(JsonError::UnknownEndpoint { key }) if key == "2"
        ));
    }
}
