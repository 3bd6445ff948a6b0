use super::notification::{Notification, NotificationBatch};
use super::transaction::NotificationTransaction;
use crate::error::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Source of notification batches, and sink for their terminal outcome.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationChannel<T: Send + Sync + 'static>: Send + Sync {
    /// Waits for the next batch. Returns `RelayError::Cancelled` once the
    /// token fires; an empty batch means nothing is left to deliver.
    async fn receive(&self, cancellation: &CancellationToken) -> Result<NotificationBatch<T>>;

    fn commit(
        &self,
        notifications: &[Notification<T>],
        transaction: &NotificationTransaction,
    ) -> Result<()>;

    fn rollback(
        &self,
        notifications: &[Notification<T>],
        transaction: &NotificationTransaction,
    ) -> Result<()>;
}

/// Encodes a notification into the bytes handed to storage.
pub trait MessageSerializer<T>: Send + Sync {
    fn serialize(&self, notification: &Notification<T>) -> Result<Vec<u8>>;
}

/// Persists a whole batch, or nothing of it.
pub trait StorageProvider<T>: Send + Sync {
    fn store(
        &self,
        serializer: &dyn MessageSerializer<T>,
        notifications: &[Notification<T>],
    ) -> Result<()>;
}

#[cfg_attr(test, automock)]
pub trait TransactionTracker: Send + Sync {
    fn create_transaction(&self) -> Result<NotificationTransaction>;
}

pub type SharedNotificationChannel<T> = Arc<dyn NotificationChannel<T>>;
pub type SharedMessageSerializer<T> = Arc<dyn MessageSerializer<T>>;
pub type SharedStorageProvider<T> = Arc<dyn StorageProvider<T>>;
pub type SharedTransactionTracker = Arc<dyn TransactionTracker>;
