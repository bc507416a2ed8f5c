use crate::domain::model::Movie;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Local persistent key-value store.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str)
        -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn share_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// External title search and id lookup.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn search_by_title(&self, term: &str) -> Result<Vec<Movie>>;
    async fn lookup_by_id(&self, imdb_id: &str) -> Result<Movie>;
}
