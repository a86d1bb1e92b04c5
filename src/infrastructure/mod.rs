//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! rule logic: configuration loading and logging setup.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging

pub mod config;
