use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::TreeBuilder;

/// `f(x)\n`
fn call_tree() -> SyntaxTree {
	let mut b = TreeBuilder::new();
	b.start_node("Script", 0)
		.start_node("CallExpression", 0)
		.token("VariableName", 0, 1)
		.start_node("ArgList", 1)
		.token("(", 1, 2)
		.token("VariableName", 2, 3)
		.token(")", 3, 4)
		.finish_node(4)
		.finish_node(4)
		.finish_node(5);
	b.finish().unwrap()
}

fn call_json() -> Value {
	serde_json::to_value(call_tree()).unwrap()
}

fn load(value: Value) -> Result<SyntaxTree, String> {
	serde_json::from_value(value).map_err(|e| e.to_string())
}

#[test]
fn test_valid_snapshot_loads() {
	let tree = load(call_json()).unwrap();
	assert_eq!(tree.len(), 7);
	assert_eq!(tree.text_len(), 5);
	assert_eq!(tree.root().resolve(2, crate::Side::After).name(), "VariableName");
}

#[test]
fn test_empty_arena_is_rejected() {
	let err = load(json!({ "kinds": [], "nodes": [], "children": [] })).unwrap_err();
	assert!(err.contains("no root"), "{err}");
}

#[test]
fn test_children_past_table_are_rejected() {
	let value = json!({
		"kinds": [{ "name": "Script", "is_error": false }],
		"nodes": [{
			"kind": 0,
			"from": 0,
			"to": 1,
			"parent": null,
			"index": 0,
			"children": { "start": 0, "end": 3 },
		}],
		"children": [],
	});
	let err = load(value).unwrap_err();
	assert!(err.contains("malformed"), "{err}");
}

#[rstest]
#[case::unknown_kind("/nodes/2/kind", json!(99), "unknown kind")]
#[case::error_flag("/kinds/0/is_error", json!(true), "error flag")]
#[case::root_parent("/nodes/0/parent", json!(1), "root has a parent")]
#[case::dangling_child("/children/0", json!(40), "does not link back")]
#[case::wrong_index("/nodes/2/index", json!(1), "does not link back")]
#[case::inverted("/nodes/5/to", json!(1), "inverted")]
#[case::escapes_parent("/nodes/1/to", json!(9), "escapes parent")]
fn test_broken_snapshot_is_rejected(#[case] pointer: &str, #[case] replacement: Value, #[case] message: &str) {
	let mut value = call_json();
	*value.pointer_mut(pointer).unwrap() = replacement;

	let err = load(value).unwrap_err();
	assert!(err.contains(message), "{err}");
}

#[test]
fn test_overlapping_siblings_are_rejected() {
	let mut value = call_json();
	// `(` moved onto the argument.
	*value.pointer_mut("/nodes/4/to").unwrap() = json!(3);

	let err = load(value).unwrap_err();
	assert!(err.contains("overlaps"), "{err}");
}

#[test]
fn test_error_kind_round_trips() {
	let mut b = TreeBuilder::new();
	b.start_node("Script", 0).token("Number", 0, 1).error(1).finish_node(1);
	let tree = b.finish().unwrap();

	let restored: SyntaxTree = serde_json::from_str(&serde_json::to_string(&tree).unwrap()).unwrap();
	assert!(restored.root().last_child().is_some_and(|n| n.is_error()));
}
