//! Control-flow-graph analyses.
//!
//! The analyses here are generic over the graph capabilities in
//! `data_structure::graph`, so they work on any control-flow graph that can
//! replay its successor edges; in this workspace, an `ir_ssa` function.
//!
//! All derived tables are built fresh by each call and describe the graph as
//! it was at that moment. They are never invalidated automatically: any
//! structural edit to the graph makes previously computed tables undefined
//! to keep using, and recomputation is the caller's responsibility.

mod data_flow;
mod dominators;
mod natural_loops;
mod predecessors;

pub use data_flow::*;
pub use dominators::*;
pub use natural_loops::*;
pub use predecessors::*;

use data_structure::{FxHashMap, FxHashSet};

/// A set of graph nodes, compared by handle.
pub type BlockSet<N> = FxHashSet<N>;

/// Map from each reachable node to its direct predecessors.
pub type PredecessorsTable<N> = FxHashMap<N, BlockSet<N>>;

/// Map from each reachable node to the set of nodes that dominate it.
pub type DominatorsTable<N> = FxHashMap<N, BlockSet<N>>;
