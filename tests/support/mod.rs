#![allow(dead_code)]

pub mod architecture;
pub mod rules;
