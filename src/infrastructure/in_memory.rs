use crate::domain::ports::ReferenceRegistry;
use crate::domain::reference::TransactionReference;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory registry of issued transaction references.
///
/// Uses `Arc<RwLock<HashSet<TransactionReference>>>` so clones share state.
/// Suitable for tests and single-process deployments; production callers back
/// the port with their order table.
#[derive(Default, Clone)]
pub struct InMemoryReferenceRegistry {
    references: Arc<RwLock<HashSet<TransactionReference>>>,
}

impl InMemoryReferenceRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.references.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.references.read().await.is_empty()
    }

    pub async fn contains(&self, reference: &TransactionReference) -> bool {
        self.references.read().await.contains(reference)
    }
}

#[async_trait]
impl ReferenceRegistry for InMemoryReferenceRegistry {
    async fn reserve(&self, reference: &TransactionReference) -> Result<bool> {
        let mut references = self.references.write().await;
        Ok(references.insert(reference.clone()))
    }
}
