//! `reqwest` backed access to the reception endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::catalog::{Brand, EquipmentModel};
use crate::domain::client::ClientRecord;
use crate::domain::types::{BrandId, CategoryId};
use crate::dto::api::{BrandDto, ClientDto, ModelDto, SubmitResponse};
use crate::forms::reception::ReceptionActPayload;
use crate::models::config::ReceptionSettings;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CatalogReader, ClientDirectory, ReceptionActWriter};

pub const CSRF_HEADER: &str = "X-CSRFToken";

const BRANDS_PATH: &str = "/api/brands/";
const MODELS_PATH: &str = "/api/models/";
const SEARCH_CLIENTS_PATH: &str = "/api/search-clients/";

/// HTTP client for the service center backend.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: reqwest::Client,
    base_url: String,
    submit_path: String,
    csrf_token: String,
}

impl HttpRepository {
    pub fn new(settings: &ReceptionSettings) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| RepositoryError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            submit_path: settings.submit_path.clone(),
            csrf_token: settings.csrf_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RepositoryResult<T> {
        let url = self.url(path);
        log::debug!("GET {url} {query:?}");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("GET {url} failed with status {status}");
            return Err(RepositoryError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Converts wire records into domain values, failing on the first invalid one.
fn into_domain<D, T>(items: Vec<D>) -> RepositoryResult<Vec<T>>
where
    T: TryFrom<D>,
    RepositoryError: From<T::Error>,
{
    items
        .into_iter()
        .map(|item| T::try_from(item).map_err(RepositoryError::from))
        .collect()
}

#[async_trait]
impl CatalogReader for HttpRepository {
    async fn list_brands(&self, category: CategoryId) -> RepositoryResult<Vec<Brand>> {
        let brands: Vec<BrandDto> = self
            .get_json(BRANDS_PATH, &[("category_id", category.to_string())])
            .await?;
        into_domain(brands)
    }

    async fn list_models(&self, brand: BrandId) -> RepositoryResult<Vec<EquipmentModel>> {
        let models: Vec<ModelDto> = self
            .get_json(MODELS_PATH, &[("brand_id", brand.to_string())])
            .await?;
        into_domain(models)
    }
}

#[async_trait]
impl ClientDirectory for HttpRepository {
    async fn search_clients(&self, query: &str) -> RepositoryResult<Vec<ClientRecord>> {
        let clients: Vec<ClientDto> = self
            .get_json(SEARCH_CLIENTS_PATH, &[("q", query.to_string())])
            .await?;
        into_domain(clients)
    }
}

#[async_trait]
impl ReceptionActWriter for HttpRepository {
    async fn submit_act(&self, payload: &ReceptionActPayload) -> RepositoryResult<SubmitResponse> {
        let url = self.url(&self.submit_path);
        log::info!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, &self.csrf_token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("POST {url} failed with status {status}");
            return Err(RepositoryError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
