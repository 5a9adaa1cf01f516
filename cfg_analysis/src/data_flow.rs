use data_structure::graph::Successors;
use data_structure::worklist::WorkStack;

/// The capability implemented by block-oriented analyses, used to drive
/// them through [`forward_dataflow`].
pub trait BlockAnalyzer<N> {
    /// Called for each block visited by a driver algorithm, in an order
    /// defined by that algorithm.
    ///
    /// The implementation updates its own analysis state to account for
    /// `block` and returns true if and only if that update changed the
    /// state future computations depend on. The same block may be passed
    /// many times (once per loop iteration in graphs with cycles), with
    /// more predecessor information available on each call. Implementations
    /// must eventually reach a fixpoint, after which every call returns
    /// false for every block; a non-monotone analyzer loops the driver
    /// forever.
    ///
    /// There is no channel for reporting an error to the driver. An
    /// implementation that fails must record the failure in its own state
    /// and return false from then on, letting the driver run down
    /// naturally; the caller then inspects the analyzer afterwards.
    fn analyze_block(&mut self, block: N) -> bool;
}

/// Any `FnMut(N) -> bool` closure is an analyzer over its captured state.
impl<N, F> BlockAnalyzer<N> for F
where
    F: FnMut(N) -> bool,
{
    fn analyze_block(&mut self, block: N) -> bool {
        self(block)
    }
}

/// Drives `analyzer` over the graph entered at `start` until no visit
/// reports a change.
///
/// The analyzer is first called with the start block. Whenever a visit
/// reports a change, the visited block's successors are queued (unless
/// already pending) and visited in turn. Returning false on a first visit
/// is valid and skips the block's successors, e.g. when the analyzer has
/// failed or already knows enough.
///
/// No guarantee is made that a block's predecessors are all visited before
/// the block itself; with loops that is impossible. Analyzers must tolerate
/// partial predecessor information and rely on being revisited.
///
/// The visitation order is deterministic for a fixed graph and analyzer
/// behavior, but its exact shape is not a long-term compatibility contract.
pub fn forward_dataflow<G>(graph: &G, start: G::Node, analyzer: &mut impl BlockAnalyzer<G::Node>)
where
    G: Successors,
{
    let mut queue = WorkStack::with_capacity(6);
    queue.add(start);

    while let Some(block) = queue.next() {
        if analyzer.analyze_block(block) {
            let before = queue.len();
            for succ in graph.successors(block) {
                queue.add(succ);
            }
            // Pushed in terminator order, the successors would pop in
            // reverse. Reversing the freshly added span restores that
            // order, which sends the traversal into a loop body and back
            // through the loop header before it moves past the loop; the
            // block after the loop is then visited once instead of twice.
            queue.reverse_top(queue.len() - before);
        }
    }
}
