use data_structure::graph::{DirectedGraph, Successors};
use data_structure::index::Idx;
use data_structure::worklist::WorkStack;
use data_structure::BitVec;

use crate::PredecessorsTable;

/// Finds the predecessors of `start` and of every block reachable from it,
/// by inverting the successor edges the terminators imply.
///
/// Every reachable block has an entry in the result. A block other than
/// `start` must have at least one predecessor, since it was reached over
/// some edge; `start` itself maps to the empty set unless a cycle routes
/// back into it.
///
/// This is a single traversal, not a fixpoint: each reachable block is
/// popped exactly once.
pub fn find_predecessors<G>(graph: &G, start: G::Node) -> PredecessorsTable<G::Node>
where
    G: DirectedGraph + Successors,
{
    let mut table = PredecessorsTable::default();
    let mut seen: BitVec = BitVec::repeat(false, graph.num_nodes());

    let mut queue = WorkStack::with_capacity(6);
    queue.add(start);
    while let Some(block) = queue.next() {
        seen.set(block.index(), true);
        table.entry(block).or_default();
        for succ in graph.successors(block) {
            table.entry(succ).or_default().insert(block);
            if !seen[succ.index()] {
                queue.add(succ);
            }
        }
    }

    table
}
