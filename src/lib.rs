pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod fetcher;
pub mod model;

pub use error::FetchError;

pub type Result<T> = std::result::Result<T, FetchError>;
