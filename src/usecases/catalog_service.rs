//! Objective catalog: fetched once per subject+class, immutable afterwards.
//!
//! A failed fetch leaves the catalog in `Failed`; `fetch` keeps returning that
//! error until the user calls `retry`. There is no automatic retry or backoff.

use crate::domain::{DomainError, ObjectiveNode, filter_nodes};
use crate::ports::SchoolApi;
use crate::usecases::with_timeout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    Empty,
    Loaded {
        subject: String,
        class_id: String,
        nodes: Vec<ObjectiveNode>,
    },
    Failed {
        subject: String,
        class_id: String,
        message: String,
    },
}

pub struct ObjectiveCatalog {
    api: Arc<dyn SchoolApi>,
    request_timeout: Option<Duration>,
    state: RwLock<CatalogState>,
}

impl ObjectiveCatalog {
    pub fn new(api: Arc<dyn SchoolApi>, request_timeout: Option<Duration>) -> Self {
        Self {
            api,
            request_timeout,
            state: RwLock::new(CatalogState::Empty),
        }
    }

    pub async fn state(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    /// Return the catalog for `subject`/`class_id`, fetching it on first use.
    pub async fn fetch(
        &self,
        subject: &str,
        class_id: &str,
    ) -> Result<Vec<ObjectiveNode>, DomainError> {
        {
            let state = self.state.read().await;
            match &*state {
                CatalogState::Loaded {
                    subject: s,
                    class_id: c,
                    nodes,
                } if s == subject && c == class_id => return Ok(nodes.clone()),
                CatalogState::Failed {
                    subject: s,
                    class_id: c,
                    message,
                } if s == subject && c == class_id => {
                    return Err(DomainError::CatalogUnavailable(message.clone()));
                }
                _ => {}
            }
        }
        self.load(subject, class_id).await
    }

    /// Clear a failed state and fetch again. A loaded catalog is fetched again too.
    pub async fn retry(
        &self,
        subject: &str,
        class_id: &str,
    ) -> Result<Vec<ObjectiveNode>, DomainError> {
        info!(subject, class_id, "retrying objective catalog fetch");
        self.load(subject, class_id).await
    }

    /// Filter the loaded catalog. Empty if nothing is loaded.
    pub async fn search(&self, query: &str) -> Vec<ObjectiveNode> {
        match &*self.state.read().await {
            CatalogState::Loaded { nodes, .. } => filter_nodes(nodes, query),
            _ => Vec::new(),
        }
    }

    async fn load(
        &self,
        subject: &str,
        class_id: &str,
    ) -> Result<Vec<ObjectiveNode>, DomainError> {
        let result = with_timeout(
            self.request_timeout,
            self.api.fetch_objectives(subject, class_id),
        )
        .await;

        let mut state = self.state.write().await;
        match result {
            Ok(nodes) => {
                info!(subject, class_id, topics = nodes.len(), "objective catalog loaded");
                *state = CatalogState::Loaded {
                    subject: subject.to_string(),
                    class_id: class_id.to_string(),
                    nodes: nodes.clone(),
                };
                Ok(nodes)
            }
            Err(e) => {
                warn!(subject, class_id, error = %e, "objective catalog fetch failed");
                *state = CatalogState::Failed {
                    subject: subject.to_string(),
                    class_id: class_id.to_string(),
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }
}
