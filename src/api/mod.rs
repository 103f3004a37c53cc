mod client;
mod error;
pub mod types;

use async_trait::async_trait;

pub use client::*;
pub use error::*;
pub use types::*;

/// The remote credential lookup, seen from the console.
#[async_trait]
pub trait CensistaLookup: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Record>, LookupError>;
}
