//! # carelink-core
//!
//! Core crate for the CareLink coordination platform. Contains traits,
//! configuration schemas, typed identifiers and credential value types,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other CareLink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
