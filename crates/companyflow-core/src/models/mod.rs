//! Data models for the application
//!
//! Row types, request DTOs and response views for each organisational entity,
//! plus the shared pagination and partial-update field types.

mod department;
mod designation;
mod employee;
mod level;
mod pagination;
mod patch;
mod status;

// Re-export all models for convenient imports
pub use department::*;
pub use designation::*;
pub use employee::*;
pub use level::*;
pub use pagination::*;
pub use patch::*;
pub use status::*;
