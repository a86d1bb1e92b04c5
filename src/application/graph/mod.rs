//! Association graph: top-N selection, construction and layout.

mod builder;
mod layout;

pub use builder::{build_graph, top_by_lift, AssociationGraph, DEFAULT_GRAPH_LIMIT};
pub use layout::{lay_out, spring_layout, LayoutParams};
