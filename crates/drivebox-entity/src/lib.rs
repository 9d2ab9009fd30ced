//! # drivebox-entity
//!
//! Domain entity models for Drivebox. Every struct in this crate
//! represents a table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`; snapshots of the
//! table store are plain serde documents of these types.

pub mod content;
pub mod file;
pub mod folder;
pub mod item;
