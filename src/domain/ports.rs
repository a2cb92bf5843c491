use super::reference::TransactionReference;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Records references already handed to the gateway, so two attempts never
/// share one. Backed by the caller's order store in production.
#[async_trait]
pub trait ReferenceRegistry: Send + Sync {
    /// Reserves `reference`. Returns `false` if it was already taken.
    async fn reserve(&self, reference: &TransactionReference) -> Result<bool>;
}

pub type ReferenceRegistryBox = Box<dyn ReferenceRegistry>;
pub type ClockBox = Box<dyn Clock>;
