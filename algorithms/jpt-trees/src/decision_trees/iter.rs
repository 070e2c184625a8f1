use std::collections::VecDeque;
use std::iter::Iterator;

use super::{Jpt, Node, NodeId};

/// Level-order (BFT) iterator of nodes in a joint probability tree
pub struct NodeIter<'a> {
    tree: &'a Jpt,
    queue: VecDeque<NodeId>,
}

impl<'a> NodeIter<'a> {
    pub fn new(tree: &'a Jpt, start: NodeId) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(start);
        NodeIter { tree, queue }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.queue.pop_front().and_then(|id| tree.node(id)).map(|node| {
            self.queue.extend(node.children());

            node
        })
    }
}
