//! Inbound adapters: the command-line interface.

pub mod cli;
