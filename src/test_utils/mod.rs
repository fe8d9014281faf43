use crate::OrderedTree;

/// Ascending order over i32 keys, "at or before" semantics
pub fn ascending(
    a: &i32,
    b: &i32,
) -> bool {
    a <= b
}

pub type IntTree = OrderedTree<i32, String, fn(&i32, &i32) -> bool>;

/// Build a tree by inserting `keys` in the given order; values are "v{key}"
pub fn tree_of(keys: &[i32]) -> IntTree {
    let mut tree: IntTree = OrderedTree::new(ascending as fn(&i32, &i32) -> bool);
    for &k in keys {
        tree.insert(k, format!("v{k}"));
    }
    tree
}

/// Collect just the keys of a query result
pub fn keys_of(items: &[(&i32, &String)]) -> Vec<i32> {
    items.iter().map(|(k, _)| **k).collect()
}
