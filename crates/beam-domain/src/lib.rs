//! Domain layer: material ledger, emission calculation and summary rollup

pub mod assistant;
pub mod model;
pub mod service;
