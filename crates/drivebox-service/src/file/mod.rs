//! File operations.

pub mod service;

pub use service::{FileDownload, FileService};
