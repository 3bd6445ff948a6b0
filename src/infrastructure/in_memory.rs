use crate::domain::notification::{Notification, NotificationBatch};
use crate::domain::ports::{
    MessageSerializer, NotificationChannel, StorageProvider, TransactionTracker,
};
use crate::domain::transaction::NotificationTransaction;
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

/// A batch together with the transaction that settled it.
#[derive(Debug, Clone, PartialEq)]
pub struct SettledBatch<T> {
    pub transaction: NotificationTransaction,
    pub notifications: NotificationBatch<T>,
}

struct ChannelState<T> {
    pending: VecDeque<Notification<T>>,
    closed: bool,
    settled: HashSet<NotificationTransaction>,
    committed: Vec<SettledBatch<T>>,
    rolled_back: Vec<SettledBatch<T>>,
}

/// An in-process notification queue.
///
/// `receive` hands out up to `batch_size` pending notifications, waiting
/// while the queue is empty and still open. Once closed and drained it
/// returns empty batches. Rolled-back notifications are recorded, not
/// redelivered.
///
/// Every settled batch is kept for inspection and never released, so memory
/// grows with the total input; this is not a long-running queue.
pub struct InMemoryNotificationChannel<T> {
    state: Mutex<ChannelState<T>>,
    available: Notify,
    batch_size: usize,
}

impl<T> InMemoryNotificationChannel<T> {
    /// Creates an open, empty channel.
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(RelayError::InvalidArgument(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            state: Mutex::new(ChannelState {
                pending: VecDeque::new(),
                closed: false,
                settled: HashSet::new(),
                committed: Vec::new(),
                rolled_back: Vec::new(),
            }),
            available: Notify::new(),
            batch_size,
        })
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, notification: Notification<T>) {
        self.lock().pending.push_back(notification);
        self.available.notify_waiters();
    }

    /// Stops waiting receivers; whatever is still pending is delivered first.
    pub fn close(&self) {
        self.lock().closed = true;
        self.available.notify_waiters();
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }
}

impl<T: Clone> InMemoryNotificationChannel<T> {
    pub fn committed(&self) -> Vec<SettledBatch<T>> {
        self.lock().committed.clone()
    }

    pub fn rolled_back(&self) -> Vec<SettledBatch<T>> {
        self.lock().rolled_back.clone()
    }

    fn settle(
        &self,
        notifications: &[Notification<T>],
        transaction: &NotificationTransaction,
        committed: bool,
    ) -> Result<()> {
        let mut state = self.lock();
        if !state.settled.insert(*transaction) {
            return Err(RelayError::Channel(format!(
                "transaction {transaction} is already settled"
            )));
        }
        let batch = SettledBatch {
            transaction: *transaction,
            notifications: notifications.to_vec(),
        };
        if committed {
            state.committed.push(batch);
        } else {
            state.rolled_back.push(batch);
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> NotificationChannel<T> for InMemoryNotificationChannel<T> {
    async fn receive(&self, cancellation: &CancellationToken) -> Result<NotificationBatch<T>> {
        loop {
            if cancellation.is_cancelled() {
                return Err(RelayError::Cancelled);
            }

            // Register interest before looking at the queue so a push in
            // between is not missed.
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if !state.pending.is_empty() || state.closed {
                    let take = self.batch_size.min(state.pending.len());
                    return Ok(state.pending.drain(..take).collect());
                }
            }

            tokio::select! {
                biased;
                () = cancellation.cancelled() => return Err(RelayError::Cancelled),
                () = notified.as_mut() => {}
            }
        }
    }

    fn commit(
        &self,
        notifications: &[Notification<T>],
        transaction: &NotificationTransaction,
    ) -> Result<()> {
        self.settle(notifications, transaction, true)
    }

    fn rollback(
        &self,
        notifications: &[Notification<T>],
        transaction: &NotificationTransaction,
    ) -> Result<()> {
        self.settle(notifications, transaction, false)
    }
}

/// A thread-safe in-memory store of serialized notifications keyed by id.
///
/// Clones share the same records.
#[derive(Default, Clone)]
pub struct InMemoryStorageProvider {
    records: Arc<RwLock<HashMap<u64, Vec<u8>>>>,
}

impl InMemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u64) -> Option<Vec<u8>> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> StorageProvider<T> for InMemoryStorageProvider {
    fn store(
        &self,
        serializer: &dyn MessageSerializer<T>,
        notifications: &[Notification<T>],
    ) -> Result<()> {
        // Serialize everything up front so a failure leaves no partial batch.
        let encoded = notifications
            .iter()
            .map(|n| serializer.serialize(n).map(|bytes| (n.id, bytes)))
            .collect::<Result<Vec<_>>>()?;

        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.extend(encoded);
        Ok(())
    }
}

/// Issues transactions with increasing ids, starting at 1.
pub struct SequentialTransactionTracker {
    next: AtomicU64,
}

impl SequentialTransactionTracker {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(id: u64) -> Self {
        Self {
            next: AtomicU64::new(id),
        }
    }
}

impl Default for SequentialTransactionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionTracker for SequentialTransactionTracker {
    fn create_transaction(&self) -> Result<NotificationTransaction> {
        let id = self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map_err(|_| RelayError::Transaction("transaction ids exhausted".to_string()))?;
        Ok(NotificationTransaction::new(id))
    }
}
