//! Shared plumbing: the on-disk cache tree and the retrying HTTP fetcher.

pub mod cache;
pub mod http;

pub use cache::{stale, try_read_to_string, write_string, DataDir};
pub use http::{client, fetch_to_file};
