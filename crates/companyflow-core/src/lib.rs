//! CompanyFlow Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! credential collaborators shared by the CompanyFlow data-access layer.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod validation;

// Re-export commonly used types
pub use auth::{Argon2PasswordHasher, JwtTokenService, PasswordHasher, TokenService};
pub use config::{Config, LookupPolicy};
pub use error::{AppError, ErrorMetadata, LogLevel};
