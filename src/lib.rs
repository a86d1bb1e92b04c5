//! Rulelens - explore association rules mined from transaction data.
//!
//! Loads a precomputed rule table (antecedent, consequent, support,
//! confidence, lift), filters it by user thresholds, recommends
//! consequents for a selected item, and draws the strongest rules as a
//! force-directed association network.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Rule types, thresholds and the laid-out graph scene
//! - [`port`] - Traits at the I/O seams (rule source, graph renderer)
//! - [`application`] - Filter, recommend, graph build and layout, summary,
//!   the memoized rule cache and the per-user [`application::Session`]
//! - [`adapter`] - JSON rule file, SVG renderer and the CLI
//! - [`infrastructure`] - Configuration and logging
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use rulelens::adapter::outbound::render::SvgRenderer;
//! use rulelens::adapter::outbound::store::JsonRuleFile;
//! use rulelens::application::{Controls, Evaluation, Session};
//!
//! let session = Session::new(
//!     JsonRuleFile::new("rules.json"),
//!     Box::new(SvgRenderer::default()),
//! );
//! let controls = Controls::default().select(Some("whole milk"));
//! if let Ok(Evaluation::Ready(report)) = session.evaluate(&controls) {
//!     println!("{} rules match", report.summary.total_rules);
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
