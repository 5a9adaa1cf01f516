use data_structure::graph::Successors;
use data_structure::index::Idx;

use crate::{forward_dataflow, BlockAnalyzer, BlockSet, DominatorsTable, PredecessorsTable};

/// Computes, for `start` and every block reachable from it, the set of
/// blocks that dominate it.
///
/// `preds` must be the result of [`find_predecessors`] over the same start
/// block, with no modification to the graph in between; otherwise the
/// result is undefined.
///
/// Every block in the result has at least one dominator: itself.
///
/// [`find_predecessors`]: crate::find_predecessors
pub fn find_dominators<G>(
    graph: &G,
    start: G::Node,
    preds: &PredecessorsTable<G::Node>,
) -> DominatorsTable<G::Node>
where
    G: Successors,
{
    let mut analyzer = DominatorsAnalyzer {
        table: DominatorsTable::default(),
        preds,
    };
    forward_dataflow(graph, start, &mut analyzer);
    analyzer.table
}

struct DominatorsAnalyzer<'a, N> {
    table: DominatorsTable<N>,
    preds: &'a PredecessorsTable<N>,
}

impl<N: Idx> BlockAnalyzer<N> for DominatorsAnalyzer<'_, N> {
    fn analyze_block(&mut self, block: N) -> bool {
        let prior_len = self.table.get(&block).map_or(0, BlockSet::len);

        // Rebuild the set as the intersection over the predecessors that
        // have been initialized at least once. Predecessors that haven't
        // run yet are skipped outright: folding their empty sets into the
        // intersection would clear everything prematurely.
        let mut doms: Option<BlockSet<N>> = None;
        if let Some(pred_blocks) = self.preds.get(&block) {
            for pred in pred_blocks {
                let Some(pred_doms) = self.table.get(pred) else {
                    continue;
                };
                match &mut doms {
                    None => doms = Some(pred_doms.clone()),
                    Some(doms) => doms.retain(|d| pred_doms.contains(d)),
                }
            }
        }

        let mut doms = doms.unwrap_or_default();
        // Every block dominates itself.
        doms.insert(block);

        // Once initialized, a set only ever shrinks on later visits: the
        // intersection ranges over a growing collection of themselves
        // shrinking inputs, and the self-member is constant. Equal size
        // therefore implies equal contents. This shortcut does not hold
        // for lattices where sets can also grow; do not reuse it there.
        let changed = doms.len() != prior_len;
        self.table.insert(block, doms);
        changed
    }
}
