//! Rule data types and their invariants.

pub mod error;

mod rule;
mod scene;
mod thresholds;

pub use rule::{Rule, RuleStore};
pub use scene::{weight_label, GraphScene, Point, SceneEdge, SceneNode};
pub use thresholds::{
    ThresholdRange, Thresholds, CONFIDENCE_RANGE, LIFT_RANGE, SUPPORT_RANGE,
};
