use crate::domain::model::{Hero, ItemSummary, MovieDetails, Page, TitleQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the titles collection of the catalogue service.
#[async_trait]
pub trait Catalogue: Send + Sync {
    /// First page of the collection, sorted by descending score.
    async fn titles(&self, query: &TitleQuery) -> Result<Page<ItemSummary>>;

    /// A page referenced by a server-supplied `next` link, followed verbatim.
    async fn follow(&self, page_url: &str) -> Result<Page<ItemSummary>>;

    async fn details(&self, id: u64) -> Result<MovieDetails>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn page_size(&self) -> Option<u32>;
    fn sort_field(&self) -> &str;
}

/// What a UI layer has to offer to show the catalogue.
pub trait Renderer {
    fn hero(&mut self, hero: &Result<Hero>) -> Result<()>;
    fn carousel(&mut self, title: &str, items: &Result<Vec<ItemSummary>>) -> Result<()>;
    fn details(&mut self, details: &MovieDetails) -> Result<()>;
    fn list(&mut self, items: &[ItemSummary]) -> Result<()>;
}
