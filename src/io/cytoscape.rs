//!
//! Cytoscape.js elements of the generated node hierarchy
//!
use crate::nested::NestedResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "group", content = "data")]
pub enum Element {
    #[serde(rename = "nodes")]
    Node {
        id: String,
        /// `ingroup | outgroup`
        label: String,
        n_ingroup: usize,
    },
    #[serde(rename = "edges")]
    Edge {
        id: String,
        source: String,
        target: String,
    },
}

///
/// Nodes `n0, n1, ...` and parent -> child edges `e0, e1, ...`
///
pub fn to_elements(result: &NestedResult) -> Vec<Element> {
    let mut elements = Vec::new();
    for (i, node) in result.nodes.iter().enumerate() {
        elements.push(Element::Node {
            id: format!("n{}", i),
            label: format!("{}", node.display(&result.taxa)),
            n_ingroup: node.ingroup().len(),
        });
    }
    for (i, (parent, child)) in result.hierarchy_edges().into_iter().enumerate() {
        elements.push(Element::Edge {
            id: format!("e{}", i),
            source: format!("n{}", parent),
            target: format!("n{}", child),
        });
    }
    elements
}
