pub mod config;
pub mod document;
pub mod error;
pub mod fingerprint;
pub mod post_cache;

pub use document::Document;
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use post_cache::PostCache;
