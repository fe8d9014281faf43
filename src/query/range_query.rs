//! Bounded range queries over an [`OrderedTree`].
//!
//! All three walks are pure, deterministic and iterative: an explicit stack
//! replaces recursion and the remaining item count is threaded through the
//! walk, so traversal stops as soon as the requested count is collected.

use super::ordered_tree::Node;
use super::KeyOrder;
use super::OrderedTree;

impl<K, V, C> OrderedTree<K, V, C>
where
    C: KeyOrder<K>,
{
    /// Up to `max` items strictly after `boundary`, in ascending key order.
    ///
    /// Items equivalent to the boundary key, and everything sorting before
    /// it, are excluded. Without a boundary the whole tree is eligible.
    /// `max == 0` yields an empty result without traversal.
    pub fn bounded_after(
        &self,
        boundary: Option<&K>,
        max: usize,
    ) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(max.min(self.len));
        if max == 0 {
            return out;
        }

        let mut stack: Vec<&Node<K, V>> = Vec::new();
        let mut cur = self.root.as_deref();
        while out.len() < max && (cur.is_some() || !stack.is_empty()) {
            while let Some(node) = cur {
                match boundary {
                    // node and its entire left subtree sort at or before the
                    // boundary; only the right subtree can qualify
                    Some(b) if self.cmp.precedes(&node.key, b) => {
                        cur = node.right.as_deref();
                    }
                    _ => {
                        stack.push(node);
                        cur = node.left.as_deref();
                    }
                }
            }
            let Some(node) = stack.pop() else {
                break;
            };
            out.push((&node.key, &node.val));
            cur = node.right.as_deref();
        }
        out
    }

    /// Leftmost `n` items in ascending key order.
    ///
    /// Returns exactly `min(n, len)` items; `n == 0` returns empty without
    /// traversal.
    pub fn bottom_n(
        &self,
        n: usize,
    ) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(n.min(self.len));
        if n == 0 {
            return out;
        }

        let mut stack: Vec<&Node<K, V>> = Vec::new();
        let mut cur = self.root.as_deref();
        while out.len() < n && (cur.is_some() || !stack.is_empty()) {
            while let Some(node) = cur {
                stack.push(node);
                cur = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            out.push((&node.key, &node.val));
            cur = node.right.as_deref();
        }
        out
    }

    /// Rightmost `n` items, reassembled into ascending key order.
    ///
    /// Selection walks right-to-left so the largest keys claim the slots; the
    /// output is then reversed back into ascending order. Returns exactly
    /// `min(n, len)` items.
    pub fn top_n(
        &self,
        n: usize,
    ) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(n.min(self.len));
        if n == 0 {
            return out;
        }

        let mut stack: Vec<&Node<K, V>> = Vec::new();
        let mut cur = self.root.as_deref();
        while out.len() < n && (cur.is_some() || !stack.is_empty()) {
            while let Some(node) = cur {
                stack.push(node);
                cur = node.right.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            out.push((&node.key, &node.val));
            cur = node.left.as_deref();
        }
        out.reverse();
        out
    }
}
