mod ordered_tree;
mod range_query;

pub use ordered_tree::*;

#[cfg(test)]
mod ordered_tree_test;
#[cfg(test)]
mod range_query_test;
