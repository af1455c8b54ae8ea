use yaml_rust2::yaml::{Hash, Yaml};

use crate::error::TreeResult;
use crate::tree::{node_children, node_name, validate, DEFAULT_MAX_DEPTH};

/// Structural statistics for one taxonomy tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub root_name: String,
    pub total_nodes: usize,
    pub max_depth: usize,
    pub avg_branching_factor: f64,
}

impl Stats {
    /// The stats record as a Yaml mapping, for emission by the caller.
    pub fn to_yaml(&self) -> Yaml {
        let mut hash = Hash::new();
        hash.insert(
            Yaml::String("root_name".to_string()),
            Yaml::String(self.root_name.clone()),
        );
        hash.insert(
            Yaml::String("total_nodes".to_string()),
            Yaml::Integer(self.total_nodes as i64),
        );
        hash.insert(
            Yaml::String("max_depth".to_string()),
            Yaml::Integer(self.max_depth as i64),
        );
        hash.insert(
            Yaml::String("avg_branching_factor".to_string()),
            Yaml::Real(format!("{:?}", self.avg_branching_factor)),
        );
        Yaml::Hash(hash)
    }
}

/// Computes node count, maximum depth and average branching factor for a
/// tree, with the default recursion limit.
pub fn analyze(root: &Yaml) -> TreeResult<Stats> {
    analyze_with_limit(root, DEFAULT_MAX_DEPTH)
}

/// Same as [`analyze`] but with an explicit nesting limit.
///
/// The branching factor averages direct child links over nodes that have
/// children; a childless root yields 0.0 rather than dividing by zero.
pub fn analyze_with_limit(root: &Yaml, max_depth: usize) -> TreeResult<Stats> {
    validate(root, max_depth)?;
    let (total_nodes, depth, edges, parents) = tally(root);
    let avg_branching_factor = if parents == 0 {
        0.0
    } else {
        edges as f64 / parents as f64
    };
    Ok(Stats {
        root_name: node_name(root).to_string(),
        total_nodes,
        max_depth: depth,
        avg_branching_factor,
    })
}

// One pass over the tree: (nodes, max depth in nodes, child edges, parents).
fn tally(node: &Yaml) -> (usize, usize, usize, usize) {
    let children = node_children(node);
    if children.is_empty() {
        return (1, 1, 0, 0);
    }
    let mut nodes = 1;
    let mut deepest = 0;
    let mut edges = children.len();
    let mut parents = 1;
    for child in children {
        let (child_nodes, child_depth, child_edges, child_parents) = tally(child);
        nodes += child_nodes;
        deepest = deepest.max(child_depth);
        edges += child_edges;
        parents += child_parents;
    }
    (nodes, deepest + 1, edges, parents)
}
