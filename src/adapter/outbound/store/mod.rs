//! Rule table storage.

mod json;

pub use json::JsonRuleFile;
