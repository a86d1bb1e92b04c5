//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌──────────────┐      ┌──────────────────┐      ┌───────────────┐
//!   │  RuleSource  │ ───▶ │   Application    │ ───▶ │ GraphRenderer │
//!   │ (JSON file)  │      │ filter/rank/graph│      │     (SVG)     │
//!   └──────────────┘      └──────────────────┘      └───────────────┘
//! ```
//!
//! - [`RuleSource`] - reads the persisted rule table
//! - [`GraphRenderer`] - draws a laid-out association graph

mod render;
mod rules;

pub use render::GraphRenderer;
pub use rules::{LoadOutcome, RuleSource};
