//! The cross-type drive façade and its UI-facing coordinators.

pub mod browser;
pub mod bulk;
pub mod selection;
pub mod service;

pub use browser::DriveBrowser;
pub use bulk::{BulkReport, BulkService, DownloadBatch};
pub use selection::SelectionState;
pub use service::{ActionOutcome, DriveService};
