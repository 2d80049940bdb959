//! Database repositories for data access layer
//!
//! query/ builds statements (filters, change sets, bind values), entity.rs runs
//! them for any descriptor-driven table, and org/ holds one repository per
//! organisational entity.
//
// Statement building
pub mod query;
//
// Generic store and operation guard
pub mod entity;
pub mod guard;
//
// Organisation repositories
pub mod org;
//
// Pool and migrations
pub mod setup;

pub use entity::{DeleteMode, Entity, EntityStore, StoreOptions};
pub use guard::QueryGuard;
pub use org::{DepartmentRepository, DesignationRepository, EmployeeRepository, LevelRepository};
pub use setup::setup_database;
