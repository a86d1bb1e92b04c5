//! Graph renderers.

mod svg;

pub use svg::{GraphStyle, SvgRenderer};
