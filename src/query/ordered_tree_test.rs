use crate::test_utils::ascending;
use crate::test_utils::tree_of;
use crate::OrderedTree;

#[test]
fn test_insert_and_get() {
    let tree = tree_of(&[3, 1, 4, 1, 5]);

    assert_eq!(tree.get(&3), Some(&"v3".to_string()));
    assert_eq!(tree.get(&5), Some(&"v5".to_string()));
    assert_eq!(tree.get(&2), None);
}

#[test]
fn test_len_counts_distinct_keys() {
    let tree = tree_of(&[3, 1, 4, 1, 5]);

    // 1 was inserted twice
    assert_eq!(tree.len(), 4);
    assert!(!tree.is_empty());
}

#[test]
fn test_duplicate_insert_replaces_value() {
    let mut tree = tree_of(&[2, 1, 3]);
    tree.insert(2, "replaced".to_string());

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.get(&2), Some(&"replaced".to_string()));
}

#[test]
fn test_empty_tree() {
    let tree = tree_of(&[]);

    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.get(&1), None);
}

#[test]
fn test_custom_comparator_reverses_order() {
    let descending = |a: &i32, b: &i32| a >= b;
    let mut tree = OrderedTree::new(descending);
    for k in [2, 1, 3] {
        tree.insert(k, k * 10);
    }

    // Under the reversed comparator the "bottom" of the tree is the largest key
    let bottom = tree.bottom_n(1);
    assert_eq!(bottom, vec![(&3, &30)]);

    let top = tree.top_n(1);
    assert_eq!(top, vec![(&1, &10)]);
}

#[test]
fn test_get_with_fn_pointer_comparator() {
    let mut tree = OrderedTree::new(ascending as fn(&i32, &i32) -> bool);
    tree.insert(7, "seven".to_string());

    assert_eq!(tree.get(&7), Some(&"seven".to_string()));
}
