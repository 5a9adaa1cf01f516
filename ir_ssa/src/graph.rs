//! Graph capabilities of a function.
//!
//! The successor edges come from replaying each block's terminator; there is
//! no other edge storage to fall out of sync with.

use data_structure::graph::{DirectedGraph, StartNode, Successors};

use crate::{BasicBlock, Function};

impl DirectedGraph for Function {
    type Node = BasicBlock;

    fn num_nodes(&self) -> usize {
        self.basic_blocks.len()
    }
}

impl StartNode for Function {
    fn start_node(&self) -> Self::Node {
        BasicBlock::ENTRY_BLOCK
    }
}

impl Successors for Function {
    fn successors(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> {
        self.basic_blocks[node].terminator().successors()
    }
}
