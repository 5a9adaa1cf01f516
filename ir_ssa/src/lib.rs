//! An intermediate representation in static single assignment form,
//! based on basic blocks connected into a control-flow graph.
//!
//! Frontends build the graph through [`Function`] and [`Builder`]; analysis
//! and later compilation phases consume it through the graph capabilities
//! in `data_structure::graph`.

mod builder;
mod graph;
mod op;
mod pretty;
mod syntax;

pub use builder::*;
pub use op::*;
pub use syntax::*;
