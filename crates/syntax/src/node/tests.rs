use rstest::rstest;

use super::*;
use crate::TreeBuilder;

/// `def f():\n    pass\n`
fn function_tree() -> SyntaxTree {
	let mut b = TreeBuilder::new();
	b.start_node("Script", 0)
		.start_node("FunctionDefinition", 0)
		.token("def", 0, 3)
		.token("VariableName", 4, 5)
		.start_node("ParamList", 5)
		.token("(", 5, 6)
		.token(")", 6, 7)
		.finish_node(7)
		.start_node("Body", 7)
		.token(":", 7, 8)
		.start_node("PassStatement", 13)
		.token("pass", 13, 17)
		.finish_node(17)
		.finish_node(18)
		.finish_node(18)
		.finish_node(18);
	b.finish().unwrap()
}

/// `x = [1,\n` with the list left open.
fn unfinished_list_tree() -> SyntaxTree {
	let mut b = TreeBuilder::new();
	b.start_node("Script", 0)
		.start_node("AssignStatement", 0)
		.token("VariableName", 0, 1)
		.token("AssignOp", 2, 3)
		.start_node("ArrayExpression", 4)
		.token("[", 4, 5)
		.token("Number", 5, 6)
		.token(",", 6, 7)
		.error(8)
		.finish_node(8)
		.finish_node(8)
		.finish_node(8);
	b.finish().unwrap()
}

fn find<'t>(tree: &'t SyntaxTree, name: &str) -> Node<'t> {
	tree.nodes().find(|n| n.name() == name).unwrap()
}

#[rstest]
#[case(17, Side::Around, "Body")]
#[case(17, Side::Before, "pass")]
#[case(13, Side::After, "pass")]
#[case(13, Side::Before, "Body")]
#[case(8, Side::Before, ":")]
#[case(8, Side::After, "Body")]
#[case(5, Side::After, "(")]
#[case(5, Side::Before, "VariableName")]
#[case(200, Side::Around, "Script")]
fn test_resolve_from_root(#[case] pos: u32, #[case] side: Side, #[case] expected: &str) {
	let tree = function_tree();
	assert_eq!(tree.root().resolve(pos, side).name(), expected);
}

#[test]
fn test_resolve_climbs_out_of_start_node() {
	let tree = function_tree();
	let params = find(&tree, "ParamList");
	assert_eq!(params.resolve(15, Side::Before).name(), "pass");
	assert_eq!(params.resolve(6, Side::After).name(), ")");
}

#[test]
fn test_child_before_and_after() {
	let tree = function_tree();
	let body = find(&tree, "Body");

	assert_eq!(body.child_before(17).map(Node::name), Some("PassStatement"));
	assert_eq!(body.child_before(15).map(Node::name), Some("PassStatement"));
	assert_eq!(body.child_before(10).map(Node::name), Some(":"));
	assert_eq!(body.child_before(7), None);

	assert_eq!(body.child_after(8).map(Node::name), Some("PassStatement"));
	assert_eq!(body.child_after(17), None);
}

#[test]
fn test_sibling_and_parent_links() {
	let tree = function_tree();
	let params = find(&tree, "ParamList");

	assert_eq!(params.prev_sibling().map(Node::name), Some("VariableName"));
	assert_eq!(params.next_sibling().map(Node::name), Some("Body"));
	assert_eq!(params.parent().map(Node::name), Some("FunctionDefinition"));
	assert_eq!(tree.root().parent(), None);
	assert_eq!(tree.root().next_sibling(), None);

	let names: Vec<_> = params.children().map(Node::name).collect();
	assert_eq!(names, ["(", ")"]);
	let reversed: Vec<_> = params.children().rev().map(Node::name).collect();
	assert_eq!(reversed, [")", "("]);
}

#[test]
fn test_ancestors_include_self() {
	let tree = function_tree();
	let pass = tree.root().resolve(15, Side::Around);
	let names: Vec<_> = pass.ancestors().map(Node::name).collect();
	assert_eq!(names, ["pass", "PassStatement", "Body", "FunctionDefinition", "Script"]);

	let body = find(&tree, "Body");
	assert!(body.is_ancestor_of(pass));
	assert!(body.is_ancestor_of(body));
	assert!(!pass.is_ancestor_of(body));
}

#[test]
fn test_enter_unfinished_nodes_before() {
	let tree = unfinished_list_tree();
	let at_end = tree.root().resolve(8, Side::Around);
	assert_eq!(at_end.name(), "Script");

	let unfinished = at_end.enter_unfinished_nodes_before(8);
	assert_eq!(unfinished.name(), "ArrayExpression");
}

#[test]
fn test_enter_unfinished_ignores_closed_nodes() {
	let tree = function_tree();
	let root = tree.root();
	assert_eq!(root.enter_unfinished_nodes_before(18), root);
}

#[test]
fn test_error_nodes_are_ordinary_nodes() {
	let tree = unfinished_list_tree();
	let err = tree.nodes().find(|n| n.is_error()).unwrap();
	assert_eq!(err.name(), crate::ERROR_KIND);
	assert_eq!(err.range(), 8..8);
	assert_eq!(err.prev_sibling().map(Node::name), Some(","));
}

#[test]
fn test_snapshot_serializes() {
	let tree = function_tree();
	let json = serde_json::to_string(&tree).unwrap();
	let restored: SyntaxTree = serde_json::from_str(&json).unwrap();

	let original: Vec<_> = tree.nodes().map(|n| (n.name(), n.range())).collect();
	let copied: Vec<_> = restored.nodes().map(|n| (n.name(), n.range())).collect();
	assert_eq!(original, copied);
}
