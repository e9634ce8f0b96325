pub mod fetcher;
pub mod paginator;

pub use fetcher::{FetchJson, HttpFetcher};
pub use paginator::fetch_all;
