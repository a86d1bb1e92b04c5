//! Outbound adapters (driven side).

pub mod render;
pub mod store;
