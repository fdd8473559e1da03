//! Common helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use servicehub_reception::domain::catalog::{Brand, Category, EquipmentModel};
use servicehub_reception::domain::client::ClientRecord;
use servicehub_reception::domain::types::{
    BrandId, BrandName, CategoryId, CategoryName, ClientId, ClientShortName, ModelFullName,
    ModelId,
};
use servicehub_reception::dto::api::SubmitResponse;
use servicehub_reception::forms::reception::ReceptionActPayload;
use servicehub_reception::repository::errors::{RepositoryError, RepositoryResult};
use servicehub_reception::repository::{CatalogReader, ClientDirectory, ReceptionActWriter};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Request observed by [`FakeRepository`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Brands(i32),
    Models(i32),
    Search(String),
    Submit(serde_json::Value),
}

/// Scripted stand-in for the backend with per-request latency.
#[derive(Default)]
pub struct FakeRepository {
    brands: HashMap<i32, (Duration, Vec<Brand>)>,
    models: HashMap<i32, (Duration, Vec<EquipmentModel>)>,
    clients: Vec<ClientRecord>,
    submit: Mutex<Vec<RepositoryResult<SubmitResponse>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brands(mut self, category: i32, delay: Duration, brands: Vec<Brand>) -> Self {
        self.brands.insert(category, (delay, brands));
        self
    }

    pub fn with_models(mut self, brand: i32, delay: Duration, models: Vec<EquipmentModel>) -> Self {
        self.models.insert(brand, (delay, models));
        self
    }

    pub fn with_clients(mut self, clients: Vec<ClientRecord>) -> Self {
        self.clients = clients;
        self
    }

    /// Queues the outcome of the next submit call.
    pub fn with_submit(self, result: RepositoryResult<SubmitResponse>) -> Self {
        self.submit.lock().expect("lock").push(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn submits(&self) -> Vec<serde_json::Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Submit(body) => Some(body),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock").push(call);
    }
}

#[async_trait]
impl CatalogReader for FakeRepository {
    async fn list_brands(&self, category: CategoryId) -> RepositoryResult<Vec<Brand>> {
        self.record(Call::Brands(category.get()));
        let (delay, brands) = self
            .brands
            .get(&category.get())
            .cloned()
            .unwrap_or_default();
        tokio::time::sleep(delay).await;
        Ok(brands)
    }

    async fn list_models(&self, brand: BrandId) -> RepositoryResult<Vec<EquipmentModel>> {
        self.record(Call::Models(brand.get()));
        match self.models.get(&brand.get()).cloned() {
            Some((delay, models)) => {
                tokio::time::sleep(delay).await;
                Ok(models)
            }
            None => Err(RepositoryError::Status(404)),
        }
    }
}

#[async_trait]
impl ClientDirectory for FakeRepository {
    async fn search_clients(&self, query: &str) -> RepositoryResult<Vec<ClientRecord>> {
        self.record(Call::Search(query.to_string()));
        let needle = query.to_lowercase();
        Ok(self
            .clients
            .iter()
            .filter(|c| c.short_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReceptionActWriter for FakeRepository {
    async fn submit_act(&self, payload: &ReceptionActPayload) -> RepositoryResult<SubmitResponse> {
        let body = serde_json::to_value(payload)
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;
        self.record(Call::Submit(body));
        let mut queued = self.submit.lock().expect("lock");
        if queued.is_empty() {
            return Err(RepositoryError::Transport("no scripted response".to_string()));
        }
        queued.remove(0)
    }
}

pub fn category(id: i32, name: &str) -> Category {
    Category {
        id: CategoryId::new(id).expect("id"),
        name: CategoryName::new(name).expect("name"),
    }
}

pub fn brand(id: i32, name: &str) -> Brand {
    Brand {
        id: BrandId::new(id).expect("id"),
        name: BrandName::new(name).expect("name"),
    }
}

pub fn model(id: i32, full_name: &str) -> EquipmentModel {
    EquipmentModel {
        id: ModelId::new(id).expect("id"),
        full_name: ModelFullName::new(full_name).expect("name"),
    }
}

pub fn client(id: i32, short_name: &str) -> ClientRecord {
    ClientRecord::new(
        ClientId::new(id).expect("id"),
        ClientShortName::new(short_name).expect("name"),
        format!("ООО \"{short_name}\""),
        "Иванов И.И.".to_string(),
        "+79990001122".to_string(),
        None,
        None,
    )
}
