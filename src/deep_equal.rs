use yaml_rust2::Yaml;

/// Recursively checks if two Yaml values are structurally equal.
///
/// Arrays compare element-wise in order; hashes compare key-by-key without
/// regard to key order; everything else compares by value.
pub fn deep_equal(a: &Yaml, b: &Yaml) -> bool {
    match (a, b) {
        (Yaml::Array(a_vec), Yaml::Array(b_vec)) => {
            a_vec.len() == b_vec.len()
                && a_vec
                    .iter()
                    .zip(b_vec.iter())
                    .all(|(a_item, b_item)| deep_equal(a_item, b_item))
        }
        (Yaml::Hash(a_hash), Yaml::Hash(b_hash)) => {
            a_hash.len() == b_hash.len()
                && a_hash.iter().all(|(key, a_value)| {
                    b_hash
                        .get(key)
                        .map_or(false, |b_value| deep_equal(a_value, b_value))
                })
        }
        _ => a == b,
    }
}
