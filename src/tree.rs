use yaml_rust2::Yaml;

use crate::error::{TreeError, TreeResult};

/// Key holding a node's string identity.
pub const NAME_KEY: &str = "name";
/// Reserved key holding a node's ordered child list.
pub const CHILDREN_KEY: &str = "children";
/// Label substituted for a missing `name` field. Nodes without a name are
/// tolerated, not rejected; they all key under this sentinel during merge.
pub const FALLBACK_NAME: &str = "unnamed";
/// Nesting depth accepted before `validate` fails closed.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// The node's `name`, or the fallback sentinel when absent or not a string.
pub fn node_name(node: &Yaml) -> &str {
    node[NAME_KEY].as_str().unwrap_or(FALLBACK_NAME)
}

/// The node's `children` array, or an empty slice when absent.
pub fn node_children(node: &Yaml) -> &[Yaml] {
    match &node[CHILDREN_KEY] {
        Yaml::Array(children) => children,
        _ => &[],
    }
}

/// Checks a parsed tree once, before any core recursion.
///
/// Rejects a non-mapping root, a `name` that is present but not a string,
/// a `children` value that is not a list of mappings, and values nested
/// deeper than `max_depth`. A missing `name` is tolerated (see
/// [`FALLBACK_NAME`]).
pub fn validate(tree: &Yaml, max_depth: usize) -> TreeResult<()> {
    if !matches!(tree, Yaml::Hash(_)) {
        return Err(TreeError::InvalidStructure(
            "root is not a mapping".to_string(),
        ));
    }
    walk(tree, 1, max_depth)
}

fn walk(value: &Yaml, depth: usize, max_depth: usize) -> TreeResult<()> {
    if depth > max_depth {
        return Err(TreeError::DepthExceeded { limit: max_depth });
    }
    match value {
        Yaml::Hash(hash) => {
            for (key, child_value) in hash.iter() {
                if key.as_str() == Some(NAME_KEY) {
                    // A missing name is tolerated; a non-string one would
                    // silently key under the fallback sentinel during merge.
                    if !matches!(child_value, Yaml::String(_)) {
                        return Err(TreeError::InvalidStructure(format!(
                            "name {:?} is not a string",
                            child_value
                        )));
                    }
                } else if key.as_str() == Some(CHILDREN_KEY) {
                    let Yaml::Array(children) = child_value else {
                        return Err(TreeError::InvalidStructure(format!(
                            "children of {:?} is not a list",
                            node_name(value)
                        )));
                    };
                    for child in children {
                        if !matches!(child, Yaml::Hash(_)) {
                            return Err(TreeError::InvalidStructure(format!(
                                "child of {:?} is not a mapping",
                                node_name(value)
                            )));
                        }
                        walk(child, depth + 1, max_depth)?;
                    }
                } else {
                    walk(child_value, depth + 1, max_depth)?;
                }
            }
            Ok(())
        }
        Yaml::Array(items) => {
            for item in items {
                walk(item, depth + 1, max_depth)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
