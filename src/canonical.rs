use yaml_rust2::yaml::{Hash, Yaml};

use crate::error::TreeResult;
use crate::tree::{validate, NAME_KEY};

/// Validates a parsed tree against the nesting limit, then returns its
/// canonical form. Entry point for rewriting whole taxonomy files; plain
/// [`canonicalize`] stays limit-free for values already behind validation.
pub fn canonicalize_with_limit(tree: &Yaml, max_depth: usize) -> TreeResult<Yaml> {
    validate(tree, max_depth)?;
    Ok(canonicalize(tree))
}

/// Recursively reorders a value into canonical form: in every mapping the
/// `name` key comes first and the remaining keys sort ascending; array
/// elements keep their order; scalars pass through unchanged.
///
/// Canonical form is the equality contract of the whole tool: two trees are
/// the same tree iff their canonical forms are structurally identical, and
/// emitting a canonical tree is byte-for-byte reproducible.
pub fn canonicalize(value: &Yaml) -> Yaml {
    match value {
        Yaml::Hash(hash) => {
            let name_key = Yaml::String(NAME_KEY.to_string());
            let mut rest: Vec<&Yaml> = hash.keys().filter(|key| **key != name_key).collect();
            rest.sort_by(|a, b| a.cmp(b));

            let mut result = Hash::new();
            if let Some(name_value) = hash.get(&name_key) {
                result.insert(name_key.clone(), canonicalize(name_value));
            }
            for key in rest {
                if let Some(key_value) = hash.get(key) {
                    result.insert(key.clone(), canonicalize(key_value));
                }
            }
            Yaml::Hash(result)
        }
        Yaml::Array(items) => Yaml::Array(items.iter().map(canonicalize).collect()),
        _ => value.clone(),
    }
}
