mod common;

use common::load;
use taxa::canonical::canonicalize;
use taxa::deep_equal::deep_equal;
use taxa::error::TreeError;
use taxa::merge::{merge_trees, merge_trees_with_limit};
use taxa::tree::node_name;
use yaml_rust2::Yaml;

fn child_names(tree: &Yaml) -> Vec<String> {
    match &tree["children"] {
        Yaml::Array(children) => children
            .iter()
            .map(|child| node_name(child).to_string())
            .collect(),
        _ => vec![],
    }
}

#[test]
fn test_merge_is_idempotent() {
    let tree = load(
        r#"
name: root
rank: kingdom
tags:
  - big
  - old
children:
  - name: a
    children:
      - name: a1
  - name: b
"#,
    );

    let merged = merge_trees(&tree, &tree).unwrap();
    assert!(deep_equal(&canonicalize(&merged), &canonicalize(&tree)));
}

#[test]
fn test_list_dedup_keeps_first_occurrence() {
    let first = load("name: r\ntags:\n  - a\n  - b");
    let second = load("name: r\ntags:\n  - b\n  - c");

    let merged = merge_trees(&first, &second).unwrap();
    let expected = load("name: r\ntags:\n  - a\n  - b\n  - c");
    assert!(deep_equal(&merged, &expected));
}

#[test]
fn test_dedup_ignores_key_order() {
    let first = load("name: r\nitems:\n  - x: 1\n    y: 2");
    let second = load("name: r\nitems:\n  - y: 2\n    x: 1");

    let merged = merge_trees(&first, &second).unwrap();
    if let Yaml::Array(items) = &merged["items"] {
        assert_eq!(items.len(), 1);
    } else {
        panic!("items is not an array");
    }
}

#[test]
fn test_children_union_by_name() {
    let first = load(
        r#"
name: R
children:
  - name: A
  - name: B
    rank: genus
"#,
    );
    let second = load(
        r#"
name: R
children:
  - name: B
    count: 4
  - name: C
"#,
    );

    let merged = merge_trees(&first, &second).unwrap();
    assert_eq!(child_names(&merged), vec!["A", "B", "C"]);

    // B carries fields from both sides after the recursive merge.
    let b = &merged["children"][1];
    assert_eq!(b["rank"].as_str(), Some("genus"));
    assert_eq!(b["count"].as_i64(), Some(4));
}

#[test]
fn test_differing_roots_synthesize_wrapper() {
    let first = load("name: x\nrank: phylum");
    let second = load("name: y");

    let merged = merge_trees(&first, &second).unwrap();
    assert_eq!(merged["name"].as_str(), Some("merged_x_y"));
    assert_eq!(child_names(&merged), vec!["x", "y"]);

    // The original subtrees nest unmodified.
    assert!(deep_equal(&merged["children"][0], &first));
    assert!(deep_equal(&merged["children"][1], &second));
}

#[test]
fn test_scalar_conflict_first_wins_both_ways() {
    let first = load("name: r\nrank: 1");
    let second = load("name: r\nrank: 2");

    let forward = merge_trees(&first, &second).unwrap();
    let backward = merge_trees(&second, &first).unwrap();

    assert_eq!(forward["rank"].as_i64(), Some(1));
    assert_eq!(backward["rank"].as_i64(), Some(2));
}

#[test]
fn test_type_mismatch_prefers_first() {
    let first = load("name: r\nmeta: plain");
    let second = load("name: r\nmeta:\n  detail: nested");

    let merged = merge_trees(&first, &second).unwrap();
    assert_eq!(merged["meta"].as_str(), Some("plain"));
}

#[test]
fn test_key_only_in_second_survives() {
    let first = load("name: r");
    let second = load("name: r\nrank: order\ntags:\n  - rare");

    let merged = merge_trees(&first, &second).unwrap();
    assert_eq!(merged["rank"].as_str(), Some("order"));
    let expected_tags = load("tags:\n  - rare");
    assert!(deep_equal(&merged["tags"], &expected_tags["tags"]));
}

#[test]
fn test_duplicate_names_within_one_list_collapse_to_last() {
    let first = load(
        r#"
name: r
children:
  - name: dup
    version: 1
  - name: other
  - name: dup
    version: 2
"#,
    );
    let second = load("name: r");

    let merged = merge_trees(&first, &second).unwrap();
    assert_eq!(child_names(&merged), vec!["dup", "other"]);
    assert_eq!(merged["children"][0]["version"].as_i64(), Some(2));
}

#[test]
fn test_missing_child_name_keys_under_fallback() {
    let first = load("name: r\nchildren:\n  - rank: species");
    let second = load("name: r\nchildren:\n  - count: 3");

    let merged = merge_trees(&first, &second).unwrap();
    assert_eq!(child_names(&merged), vec!["unnamed"]);
    let child = &merged["children"][0];
    assert_eq!(child["rank"].as_str(), Some("species"));
    assert_eq!(child["count"].as_i64(), Some(3));
}

#[test]
fn test_inputs_are_not_mutated() {
    let first = load("name: r\nchildren:\n  - name: a");
    let second = load("name: r\nchildren:\n  - name: b");
    let first_copy = first.clone();
    let second_copy = second.clone();

    merge_trees(&first, &second).unwrap();
    assert!(deep_equal(&first, &first_copy));
    assert!(deep_equal(&second, &second_copy));
}

#[test]
fn test_non_list_children_is_rejected() {
    let first = load("name: r\nchildren: 5");
    let second = load("name: r");

    let err = merge_trees(&first, &second).unwrap_err();
    assert!(matches!(err, TreeError::InvalidStructure(_)));
}

#[test]
fn test_non_string_child_name_is_rejected() {
    let first = load("name: r");
    let second = load("name: r\nchildren:\n  - name: 7");

    let err = merge_trees(&first, &second).unwrap_err();
    assert!(matches!(err, TreeError::InvalidStructure(_)));
}

#[test]
fn test_scalar_child_is_rejected() {
    let first = load("name: r");
    let second = load("name: r\nchildren:\n  - just-a-string");

    let err = merge_trees(&first, &second).unwrap_err();
    assert!(matches!(err, TreeError::InvalidStructure(_)));
}

#[test]
fn test_depth_limit_applies_to_both_inputs() {
    let shallow = load("name: r");
    let deep = load(
        r#"
name: r
meta:
  a:
    b:
      c:
        d: bottom
"#,
    );

    assert_eq!(
        merge_trees_with_limit(&shallow, &deep, 3).unwrap_err(),
        TreeError::DepthExceeded { limit: 3 }
    );
    assert!(merge_trees_with_limit(&shallow, &deep, 16).is_ok());
}
