use yaml_rust2::{Yaml, YamlLoader};

/// Parses the first YAML document of an inline source string.
pub fn load(source: &str) -> Yaml {
    YamlLoader::load_from_str(source).unwrap()[0].clone()
}
