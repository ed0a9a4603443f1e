use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DetailRecord, ListItem};

#[async_trait]
pub trait Catalog: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Artwork URL for a numeric id
    fn artwork_url(&self, id: u32) -> String;

    /// First `limit` entries of the collection, in catalog order
    async fn list(&self, limit: u32) -> Result<Vec<ListItem>>;

    /// Detail record behind an entry's `url`
    async fn detail(&self, url: &str) -> Result<DetailRecord>;
}
