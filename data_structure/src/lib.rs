pub mod graph;
pub mod index;
pub mod worklist;

pub use bitvec::vec::BitVec;
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
