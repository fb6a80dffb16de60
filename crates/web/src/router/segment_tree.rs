//! Segment trie for route matching
//!
//! Paths are split on every `/`, keeping the empty segments produced by a
//! leading, trailing or doubled slash, so `/`, `/foo` and `/foo/` are three
//! different routes. Each node may have:
//!
//! - literal children, keyed by their exact segment text
//! - parameter children (`:name`), kept in insertion order
//! - one value per [`Method`], meaningful only on nodes that end a route
//!
//! Lookup is a depth first search where a literal child always wins over a
//! parameter child for the same segment. When the literal subtree fails, the
//! parameter children are tried in the order they were registered.

use std::collections::HashMap;

use slim_http::protocol::{Method, PathParams};

pub(crate) struct SegmentTree<T> {
    root: Node<T>,
}

struct Node<T> {
    children: HashMap<String, Node<T>>,
    param_children: Vec<(String, Node<T>)>,
    values: HashMap<Method, T>,
    is_route_end: bool,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self { children: HashMap::new(), param_children: Vec::new(), values: HashMap::new(), is_route_end: false }
    }

    fn child_mut(&mut self, segment: &str) -> &mut Node<T> {
        match segment.strip_prefix(':') {
            Some(name) => {
                let index = match self.param_children.iter().position(|(existing, _)| existing == name) {
                    Some(index) => index,
                    None => {
                        self.param_children.push((name.to_string(), Node::new()));
                        self.param_children.len() - 1
                    }
                };
                &mut self.param_children[index].1
            }
            None => self.children.entry(segment.to_string()).or_insert_with(Node::new),
        }
    }
}

impl<T> SegmentTree<T> {
    pub(crate) fn new() -> Self {
        Self { root: Node::new() }
    }

    /// Adds `value` for `method` at `pattern`, returning the value it replaced.
    pub(crate) fn insert(&mut self, method: Method, pattern: &str, value: T) -> Option<T> {
        let node = pattern.split('/').fold(&mut self.root, |node, segment| node.child_mut(segment));
        node.is_route_end = true;
        node.values.insert(method, value)
    }

    /// Finds the value for `method` at `path` along with the captured parameters.
    ///
    /// A path that matches a route registered under other methods only is not found.
    pub(crate) fn search(&self, method: Method, path: &str) -> Option<(&T, PathParams)> {
        let segments = path.split('/').collect::<Vec<_>>();
        let mut params = PathParams::empty();
        let value = search_node(&self.root, &segments, method, &mut params)?;
        Some((value, params))
    }
}

fn search_node<'t, T>(node: &'t Node<T>, segments: &[&str], method: Method, params: &mut PathParams) -> Option<&'t T> {
    let Some((&segment, rest)) = segments.split_first() else {
        return if node.is_route_end { node.values.get(&method) } else { None };
    };

    if let Some(child) = node.children.get(segment) {
        if let Some(value) = search_node(child, rest, method, params) {
            return Some(value);
        }
    }

    // an empty segment never binds a parameter
    if segment.is_empty() {
        return None;
    }

    for (name, child) in &node.param_children {
        let previous = params.insert(name.as_str(), segment);
        if let Some(value) = search_node(child, rest, method, params) {
            return Some(value);
        }

        match previous {
            Some(previous) => params.insert(name.as_str(), previous),
            None => params.remove(name),
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(routes: &[(Method, &str, usize)]) -> SegmentTree<usize> {
        let mut tree = SegmentTree::new();
        for &(method, pattern, id) in routes {
            tree.insert(method, pattern, id);
        }
        tree
    }

    fn params(pairs: &[(&str, &str)]) -> PathParams {
        pairs.iter().copied().collect()
    }

    fn assert_found(tree: &SegmentTree<usize>, method: Method, path: &str, id: usize, expected: &[(&str, &str)]) {
        let (value, found) = tree.search(method, path).unwrap_or_else(|| panic!("{path} should match"));
        assert_eq!(*value, id, "{path}");
        assert_eq!(found, params(expected), "{path}");
    }

    #[test]
    fn test_exact_static_routes() {
        let tree = tree(&[(Method::Get, "/about", 0), (Method::Get, "/foo/bar", 1)]);
        assert_found(&tree, Method::Get, "/foo/bar", 1, &[]);
        assert_found(&tree, Method::Get, "/about", 0, &[]);
    }

    #[test]
    fn test_root_path() {
        let tree = tree(&[(Method::Get, "/", 0)]);
        assert_found(&tree, Method::Get, "/", 0, &[]);
        assert!(tree.search(Method::Get, "").is_none());
    }

    #[test]
    fn test_not_found() {
        let tree = tree(&[(Method::Get, "/exists", 0)]);
        assert!(tree.search(Method::Get, "/does-not-exist").is_none());
    }

    #[test]
    fn test_trailing_slash_mismatch() {
        let tree = tree(&[(Method::Get, "/foo", 0)]);
        assert!(tree.search(Method::Get, "/foo/").is_none());
    }

    #[test]
    fn test_prefix_of_route_is_not_a_route() {
        let tree = tree(&[(Method::Get, "/foo/bar", 0)]);
        assert!(tree.search(Method::Get, "/foo").is_none());
    }

    #[test]
    fn test_single_param() {
        let tree = tree(&[(Method::Get, "/users/:id", 0)]);
        assert_found(&tree, Method::Get, "/users/42", 0, &[("id", "42")]);
    }

    #[test]
    fn test_multiple_params() {
        let tree = tree(&[(Method::Get, "/orders/:orderId/items/:itemId", 0)]);
        assert_found(&tree, Method::Get, "/orders/123/items/456", 0, &[("orderId", "123"), ("itemId", "456")]);
    }

    #[test]
    fn test_params_with_different_names_at_same_position() {
        let tree = tree(&[(Method::Get, "/echo/:msg/v1", 0), (Method::Get, "/echo/:message/v2", 1)]);
        assert_found(&tree, Method::Get, "/echo/hello/v1", 0, &[("msg", "hello")]);
        assert_found(&tree, Method::Get, "/echo/world/v2", 1, &[("message", "world")]);
    }

    #[test]
    fn test_params_are_tried_in_insertion_order() {
        let tree = tree(&[(Method::Get, "/x/:first", 0), (Method::Get, "/x/:second", 1)]);
        assert_found(&tree, Method::Get, "/x/1", 0, &[("first", "1")]);
    }

    #[test]
    fn test_empty_segment_never_binds_param() {
        let tree = tree(&[(Method::Get, "/files/:file", 0), (Method::Get, "/files/:file/x", 1)]);
        assert!(tree.search(Method::Get, "/files//foo").is_none());
        assert!(tree.search(Method::Get, "/files/").is_none());
        assert!(tree.search(Method::Get, "/files//x").is_none());
    }

    #[test]
    fn test_methods_on_same_path() {
        let tree = tree(&[(Method::Get, "/foo", 0), (Method::Post, "/foo", 1)]);
        assert_found(&tree, Method::Post, "/foo", 1, &[]);
        assert_found(&tree, Method::Get, "/foo", 0, &[]);
        assert!(tree.search(Method::Delete, "/foo").is_none());
    }

    #[test]
    fn test_reinsert_replaces_value() {
        let mut tree = tree(&[(Method::Get, "/x/:id", 0)]);
        assert_eq!(tree.insert(Method::Get, "/x/:id", 1), Some(0));
        assert_found(&tree, Method::Get, "/x/1", 1, &[("id", "1")]);
    }

    #[test]
    fn test_param_value_characters() {
        let tree = tree(&[(Method::Get, "/assets/:name", 0)]);
        assert_found(&tree, Method::Get, "/assets/logo-v2.png", 0, &[("name", "logo-v2.png")]);
    }

    #[test]
    fn test_static_precedence_over_param() {
        let tree = tree(&[(Method::Get, "/items/:id", 0), (Method::Get, "/items/special", 1)]);
        assert_found(&tree, Method::Get, "/items/special", 1, &[]);
        assert_found(&tree, Method::Get, "/items/123", 0, &[("id", "123")]);
    }

    #[test]
    fn test_nested_static_and_param_conflicts() {
        let tree = tree(&[(Method::Get, "/a/b/c", 0), (Method::Get, "/a/:b/c", 1)]);
        assert_found(&tree, Method::Get, "/a/b/c", 0, &[]);
        assert_found(&tree, Method::Get, "/a/xyz/c", 1, &[("b", "xyz")]);
    }

    #[test]
    fn test_failed_static_branch_falls_back_to_param() {
        let tree = tree(&[(Method::Get, "/a/b/d", 0), (Method::Get, "/a/:b/c", 1)]);
        assert_found(&tree, Method::Get, "/a/b/c", 1, &[("b", "b")]);
    }

    #[test]
    fn test_failed_param_branch_is_unbound() {
        let tree = tree(&[(Method::Get, "/p/:first/one", 0), (Method::Get, "/p/:second/two", 1)]);
        assert_found(&tree, Method::Get, "/p/v/two", 1, &[("second", "v")]);
    }

    #[test]
    fn test_repeated_param_name_last_wins() {
        let tree = tree(&[(Method::Get, "/foo/:id/bar/:id", 0)]);
        assert_found(&tree, Method::Get, "/foo/123/bar/456", 0, &[("id", "456")]);
    }

    #[test]
    fn test_backtrack_restores_outer_binding() {
        let tree = tree(&[(Method::Get, "/r/:id/:id/x", 0), (Method::Get, "/r/:id/:other/y", 1)]);
        // the inner `:id` rebinds to 2 and then fails on `y`, the outer capture must come back
        assert_found(&tree, Method::Get, "/r/1/2/y", 1, &[("id", "1"), ("other", "2")]);
    }
}
