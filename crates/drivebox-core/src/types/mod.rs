//! Shared domain-neutral types: identifiers, the path codec, slugs,
//! sorting and pagination.

pub mod id;
pub mod pagination;
pub mod path;
pub mod slug;
pub mod sorting;
pub mod virtual_dir;

pub use id::ItemId;
pub use pagination::{PageRequest, PageResponse};
pub use path::DrivePath;
pub use slug::slugify;
pub use sorting::{SortDirection, SortKey};
pub use virtual_dir::VirtualDir;
