use data_structure::graph::Successors;
use data_structure::index::Idx;
use data_structure::worklist::WorkStack;

use crate::{BlockSet, DominatorsTable, PredecessorsTable};

/// A natural loop, identified by its back edge: an edge from `tail` to a
/// `head` that dominates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalLoop<N> {
    pub head: N,
    pub tail: N,
}

/// Scans the dominator table for back edges, appending one loop per back
/// edge found to `to` (which may start empty) and returning it.
///
/// Nested and sibling loops each contribute their own entry; nothing is
/// deduplicated or ordered into a nesting hierarchy here.
///
/// `doms` must come from [`find_dominators`] with no modification to the
/// graph since, or the result is undefined.
///
/// [`find_dominators`]: crate::find_dominators
pub fn find_natural_loops<G>(
    graph: &G,
    doms: &DominatorsTable<G::Node>,
    mut to: Vec<NaturalLoop<G::Node>>,
) -> Vec<NaturalLoop<G::Node>>
where
    G: Successors,
{
    for (&block, block_doms) in doms {
        // A successor that also dominates this block closes a loop.
        for succ in graph.successors(block) {
            if block_doms.contains(&succ) {
                to.push(NaturalLoop {
                    head: succ,
                    tail: block,
                });
            }
        }
    }
    to
}

impl<N: Idx> NaturalLoop<N> {
    /// The set of blocks forming the loop's body: the head, the tail, and
    /// every ancestor of the tail that lies within the loop, i.e. any block
    /// on a path into the tail that does not pass beyond blocks already
    /// collected.
    ///
    /// `preds` must come from [`find_predecessors`] over the same start
    /// block the dominator table was built from, with no modification to
    /// the graph since, or the result is undefined.
    ///
    /// [`find_predecessors`]: crate::find_predecessors
    pub fn find_body(&self, preds: &PredecessorsTable<N>) -> BlockSet<N> {
        let mut body = BlockSet::default();
        body.insert(self.head);

        // Walk backwards from the tail. Expansion stops at the head and at
        // anything already collected, so the walk never escapes upstream of
        // the loop.
        let mut queue = WorkStack::with_capacity(4);
        queue.add(self.tail);
        while let Some(block) = queue.next() {
            if body.insert(block) {
                if let Some(pred_blocks) = preds.get(&block) {
                    for &pred in pred_blocks {
                        queue.add(pred);
                    }
                }
            }
        }
        body
    }
}
