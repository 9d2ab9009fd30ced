//! # drivebox-database
//!
//! The table store backing the drive: two flat tables (`files` and
//! `folders`) behind a transactional handle, snapshot persistence per
//! namespace, and the repository implementations — including the
//! multi-row structural primitives (cascading path rewrite, recursive
//! delete, item-count recount) that must apply atomically.

pub mod repositories;
pub mod snapshot;
pub mod store;

pub use store::{DriveStore, Tables};
