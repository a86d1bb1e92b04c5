//! CLI module graph.

pub mod command;
pub mod config;
pub mod dashboard;
pub mod diagnostic;
pub mod explore;
pub mod output;
pub mod paths;
pub mod report;
pub mod run;
