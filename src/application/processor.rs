use crate::domain::envelope::MessageEnvelope;
use crate::domain::ports::{
    SharedMessageSerializer, SharedNotificationChannel, SharedStorageProvider,
    SharedTransactionTracker,
};
use crate::error::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Hands notifications over from a channel to storage, one batch per cycle.
///
/// The processor keeps no state between cycles. Every collaborator is shared
/// behind an `Arc`, so clones can run cycles concurrently; whether the
/// collaborators tolerate that is up to them.
pub struct MessageProcessor<T: Send + Sync + 'static> {
    channel: SharedNotificationChannel<T>,
    storage: SharedStorageProvider<T>,
    serializer: SharedMessageSerializer<T>,
    tracker: SharedTransactionTracker,
}

impl<T: Send + Sync + 'static> MessageProcessor<T> {
    /// Creates a new `MessageProcessor`.
    ///
    /// # Arguments
    ///
    /// * `channel` - Where batches come from and where outcomes are signalled.
    /// * `storage` - Where received batches are persisted.
    /// * `serializer` - Passed through to `storage` on every store.
    /// * `tracker` - Issues one transaction per non-empty batch.
    pub fn new(
        channel: SharedNotificationChannel<T>,
        storage: SharedStorageProvider<T>,
        serializer: SharedMessageSerializer<T>,
        tracker: SharedTransactionTracker,
    ) -> Self {
        Self {
            channel,
            storage,
            serializer,
            tracker,
        }
    }

    /// Runs one receive, store, commit-or-rollback cycle.
    ///
    /// A storage failure is not an error for the caller: the batch is rolled
    /// back and the failure text is returned in the envelope. Cancellation
    /// is only observed while waiting for the batch; errors from the channel
    /// or the tracker propagate as is.
    pub async fn process_cycle(&self, cancellation: &CancellationToken) -> Result<MessageEnvelope> {
        let notifications = self.channel.receive(cancellation).await?;
        if notifications.is_empty() {
            debug!("Received an empty batch");
            return Ok(MessageEnvelope::default());
        }

        let transaction = self.tracker.create_transaction()?;

        match self.storage.store(self.serializer.as_ref(), &notifications) {
            Ok(()) => {
                self.channel.commit(&notifications, &transaction)?;
                info!(
                    transaction = %transaction,
                    count = notifications.len(),
                    "Notifications committed"
                );
                Ok(MessageEnvelope::committed(transaction))
            }
            Err(e) => {
                self.channel.rollback(&notifications, &transaction)?;
                warn!(
                    transaction = %transaction,
                    count = notifications.len(),
                    error = %e,
                    "Notifications rolled back"
                );
                Ok(MessageEnvelope::rolled_back(e.to_string(), transaction))
            }
        }
    }
}

impl<T: Send + Sync + 'static> Clone for MessageProcessor<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
            storage: self.storage.clone(),
            serializer: self.serializer.clone(),
            tracker: self.tracker.clone(),
        }
    }
}
