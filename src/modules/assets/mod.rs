//! Asset origin access
//!
//! Downloads chart images and CSV exports from the remote asset host.

mod http_fetcher;

pub use http_fetcher::{AssetFetcher, FetchError, HttpAssetFetcher};
