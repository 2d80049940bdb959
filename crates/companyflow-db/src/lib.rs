//! CompanyFlow database layer
//!
//! Postgres repositories for departments, levels, designations and employees,
//! built on one filtered-pagination and partial-update engine.

pub mod db;

pub use db::*;
