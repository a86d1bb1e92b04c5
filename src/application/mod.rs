//! Application layer: the filter, rank and graph pipeline over a loaded
//! rule store, plus the session that drives it.

pub mod cache;
pub mod filter;
pub mod graph;
pub mod recommend;
pub mod session;
pub mod summary;

pub use cache::{LoadedRules, RuleCache, Snapshot};
pub use filter::{filter_rules, FilteredView};
pub use recommend::{recommend, Recommendation, DEFAULT_RECOMMENDATION_LIMIT};
pub use session::{Controls, Evaluation, GraphSection, Report, Session, View, NO_SELECTION};
pub use summary::Summary;
