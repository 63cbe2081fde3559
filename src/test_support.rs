use async_trait::async_trait;

use crate::errno::DomainError;
use crate::store::Store;

/// Store that answers every ping and holds no data.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct NullStore {
    label: &'static str,
}

impl NullStore {
    pub(crate) fn with_label(label: &'static str) -> Self {
        Self { label }
    }
}

#[async_trait]
impl Store for NullStore {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
