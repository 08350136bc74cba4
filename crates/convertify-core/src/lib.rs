//! # convertify-core
//!
//! Shared crate for Convertify. Contains the configuration schema and
//! loader, and the unified error type used at the application boundary.
//!
//! This crate has **no** internal dependencies on other Convertify crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
