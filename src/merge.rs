use std::collections::HashMap;

use log::debug;
use yaml_rust2::yaml::{Hash, Yaml};

use crate::canonical::canonicalize;
use crate::deep_equal::deep_equal;
use crate::error::TreeResult;
use crate::tree::{node_name, validate, CHILDREN_KEY, DEFAULT_MAX_DEPTH, NAME_KEY};

/// Union-merges two taxonomy trees into a new tree, with the default
/// recursion limit. Inputs are not mutated.
pub fn merge_trees(first: &Yaml, second: &Yaml) -> TreeResult<Yaml> {
    merge_trees_with_limit(first, second, DEFAULT_MAX_DEPTH)
}

/// Same as [`merge_trees`] but with an explicit nesting limit.
///
/// Equal root names union-merge field by field. Differing root names do not
/// merge contents; both trees nest under a synthetic `merged_<a>_<b>` root.
pub fn merge_trees_with_limit(first: &Yaml, second: &Yaml, max_depth: usize) -> TreeResult<Yaml> {
    validate(first, max_depth)?;
    validate(second, max_depth)?;
    Ok(merge_nodes(first, second))
}

fn merge_nodes(first: &Yaml, second: &Yaml) -> Yaml {
    let first_name = node_name(first);
    let second_name = node_name(second);
    if first_name == second_name {
        return union_merge(first, second);
    }

    debug!(
        "Root names {:?} and {:?} differ; nesting both under a synthetic root.",
        first_name, second_name
    );
    let children = merge_children(std::slice::from_ref(first), std::slice::from_ref(second));
    let mut root = Hash::new();
    root.insert(
        Yaml::String(NAME_KEY.to_string()),
        Yaml::String(format!("merged_{}_{}", first_name, second_name)),
    );
    root.insert(
        Yaml::String(CHILDREN_KEY.to_string()),
        Yaml::Array(children),
    );
    Yaml::Hash(root)
}

/// Field-wise union of two values.
///
/// Mappings merge over the union of their keys, with the reserved `children`
/// key routed to [`merge_children`]. Non-children arrays concatenate and
/// deduplicate. Any other pairing resolves to the first value; a conflicting
/// scalar or mixed-type field silently keeps the first tree's side.
fn union_merge(first: &Yaml, second: &Yaml) -> Yaml {
    match (first, second) {
        (Yaml::Hash(first_hash), Yaml::Hash(second_hash)) => {
            let mut merged = Hash::new();
            for (key, first_value) in first_hash.iter() {
                let merged_value = if key.as_str() == Some(CHILDREN_KEY) {
                    let second_children = second_hash.get(key).map_or(&[][..], child_slice);
                    Yaml::Array(merge_children(child_slice(first_value), second_children))
                } else {
                    match second_hash.get(key) {
                        Some(second_value) => union_merge(first_value, second_value),
                        None => first_value.clone(),
                    }
                };
                merged.insert(key.clone(), merged_value);
            }
            for (key, second_value) in second_hash.iter() {
                if merged.contains_key(key) {
                    continue;
                }
                let merged_value = if key.as_str() == Some(CHILDREN_KEY) {
                    Yaml::Array(merge_children(&[], child_slice(second_value)))
                } else {
                    second_value.clone()
                };
                merged.insert(key.clone(), merged_value);
            }
            Yaml::Hash(merged)
        }
        (Yaml::Array(first_items), Yaml::Array(second_items)) => {
            Yaml::Array(dedup_values(first_items.iter().chain(second_items.iter())))
        }
        // First-argument-wins conflict resolution, never an error.
        _ => first.clone(),
    }
}

// Validation has already required children to be an array.
fn child_slice(value: &Yaml) -> &[Yaml] {
    match value {
        Yaml::Array(children) => children,
        _ => &[],
    }
}

/// Name-keyed set union of two sibling lists.
///
/// The first list seeds the order; a name repeated within it keeps its first
/// position but the last value. Matching names from the second list re-enter
/// the full node merge; new names append in the second list's order.
fn merge_children(first: &[Yaml], second: &[Yaml]) -> Vec<Yaml> {
    let mut merged: Vec<Yaml> = Vec::with_capacity(first.len() + second.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for child in first {
        let name = node_name(child).to_string();
        match positions.get(&name) {
            Some(&index) => merged[index] = child.clone(),
            None => {
                positions.insert(name, merged.len());
                merged.push(child.clone());
            }
        }
    }
    for child in second {
        let name = node_name(child).to_string();
        match positions.get(&name) {
            Some(&index) => merged[index] = merge_nodes(&merged[index], child),
            None => {
                positions.insert(name, merged.len());
                merged.push(child.clone());
            }
        }
    }
    merged
}

/// Drops repeated values, keeping first occurrences. Two values are repeats
/// iff their canonical forms are structurally equal.
fn dedup_values<'a>(items: impl Iterator<Item = &'a Yaml>) -> Vec<Yaml> {
    let mut seen: Vec<Yaml> = Vec::new();
    let mut unique = Vec::new();
    for item in items {
        let canonical = canonicalize(item);
        if seen.iter().any(|kept| deep_equal(kept, &canonical)) {
            continue;
        }
        seen.push(canonical);
        unique.push(item.clone());
    }
    unique
}
