//! Mock repository implementations for isolating the controller in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::catalog::{Brand, EquipmentModel};
use crate::domain::client::ClientRecord;
use crate::domain::types::{BrandId, CategoryId};
use crate::dto::api::SubmitResponse;
use crate::forms::reception::ReceptionActPayload;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CatalogReader, ClientDirectory, ReceptionActWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl CatalogReader for Repository {
        async fn list_brands(&self, category: CategoryId) -> RepositoryResult<Vec<Brand>>;
        async fn list_models(&self, brand: BrandId) -> RepositoryResult<Vec<EquipmentModel>>;
    }

    #[async_trait]
    impl ClientDirectory for Repository {
        async fn search_clients(&self, query: &str) -> RepositoryResult<Vec<ClientRecord>>;
    }

    #[async_trait]
    impl ReceptionActWriter for Repository {
        async fn submit_act(
            &self,
            payload: &ReceptionActPayload,
        ) -> RepositoryResult<SubmitResponse>;
    }
}
