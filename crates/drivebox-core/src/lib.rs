//! # drivebox-core
//!
//! Core crate for Drivebox. Contains the path codec, typed identifiers,
//! sorting/pagination types, configuration schemas, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Drivebox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
