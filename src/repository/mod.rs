use async_trait::async_trait;

use crate::{
    domain::{
        catalog::{Brand, EquipmentModel},
        client::ClientRecord,
        types::{BrandId, CategoryId},
    },
    dto::api::SubmitResponse,
    forms::reception::ReceptionActPayload,
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;

#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn list_brands(&self, category: CategoryId) -> RepositoryResult<Vec<Brand>>;
    async fn list_models(&self, brand: BrandId) -> RepositoryResult<Vec<EquipmentModel>>;
}

#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn search_clients(&self, query: &str) -> RepositoryResult<Vec<ClientRecord>>;
}

#[async_trait]
pub trait ReceptionActWriter: Send + Sync {
    async fn submit_act(&self, payload: &ReceptionActPayload) -> RepositoryResult<SubmitResponse>;
}

/// Everything the reception controller needs from the server.
pub trait ReceptionRepository: CatalogReader + ClientDirectory + ReceptionActWriter {}

impl<T> ReceptionRepository for T where T: CatalogReader + ClientDirectory + ReceptionActWriter {}
