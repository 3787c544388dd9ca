use crate::node::SplittableNode;

/// Trait for handling the growth of the tree.
pub trait Grower {
    /// Add a node to the grower.
    fn add_node(&mut self, node: SplittableNode);
    /// Get the next node to split, `None` once growth is complete.
    fn get_next_node(&mut self) -> Option<SplittableNode>;
    /// Check if the grower is empty.
    fn is_empty(&self) -> bool;
}

/// Depth-first growth. The last node added is the next one grown, so pushing
/// a right child before its left sibling grows the whole left subtree first.
impl Grower for Vec<SplittableNode> {
    fn add_node(&mut self, node: SplittableNode) {
        self.push(node);
    }

    fn get_next_node(&mut self) -> Option<SplittableNode> {
        self.pop()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}
