//! Core type definitions used across the docbase workspace.

pub mod continuation;
pub mod etag;
pub mod feed;
pub mod pagination;
pub mod sorting;

pub use continuation::{ContinuationToken, Cursor};
pub use etag::ETag;
pub use feed::{DocumentQuery, ETAG_FIELD, FeedOptions, FeedPage, StoredDocument};
pub use pagination::Page;
pub use sorting::{SortDirection, SortPath, SortSpec};
