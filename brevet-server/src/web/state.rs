//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::{Brevet, BrevetId};
use crate::remote::ApiClient;
use crate::store::BrevetStore;

use super::dto::BrevetResult;
use super::error::AppError;

/// Where submitted brevets are kept.
#[derive(Clone)]
pub enum Backend {
    /// This process's own store
    Local(BrevetStore),
    /// Another server's `/api` routes
    Remote(ApiClient),
}

impl Backend {
    /// All brevets, oldest first.
    pub async fn list(&self) -> Result<Vec<BrevetResult>, AppError> {
        match self {
            Backend::Local(store) => Ok(store
                .list()
                .await
                .iter()
                .map(BrevetResult::from_stored)
                .collect()),
            Backend::Remote(client) => Ok(client.list().await?),
        }
    }

    pub async fn get(&self, id: BrevetId) -> Result<BrevetResult, AppError> {
        match self {
            Backend::Local(store) => {
                let brevet = store.get(id).await?;
                Ok(BrevetResult::from_brevet(Some(id), &brevet))
            }
            Backend::Remote(client) => Ok(client.get(id).await?),
        }
    }

    /// The most recently submitted brevet, if any.
    pub async fn latest(&self) -> Result<Option<BrevetResult>, AppError> {
        match self {
            Backend::Local(store) => Ok(store.latest().await.as_ref().map(BrevetResult::from_stored)),
            Backend::Remote(client) => Ok(client.list().await?.pop()),
        }
    }

    pub async fn insert(&self, brevet: Brevet) -> Result<BrevetId, AppError> {
        match self {
            Backend::Local(store) => Ok(store.insert(brevet).await?),
            Backend::Remote(client) => Ok(client.insert(&brevet).await?),
        }
    }

    pub async fn update(&self, id: BrevetId, brevet: Brevet) -> Result<(), AppError> {
        match self {
            Backend::Local(store) => Ok(store.update(id, brevet).await?),
            Backend::Remote(client) => Ok(client.update(id, &brevet).await?),
        }
    }

    pub async fn delete(&self, id: BrevetId) -> Result<(), AppError> {
        match self {
            Backend::Local(store) => Ok(store.delete(id).await?),
            Backend::Remote(client) => Ok(client.delete(id).await?),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Brevet storage
    pub backend: Arc<Backend>,
}

impl AppState {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Backend::Local(BrevetStore::new()))
    }
}
