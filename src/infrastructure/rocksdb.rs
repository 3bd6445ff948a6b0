use crate::domain::notification::Notification;
use crate::domain::ports::{MessageSerializer, StorageProvider};
use crate::error::{RelayError, Result};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding serialized notifications keyed by id.
pub const CF_NOTIFICATIONS: &str = "notifications";

/// A persistent storage provider backed by RocksDB.
///
/// Each `store` call is written as a single `WriteBatch`, so a batch is
/// persisted entirely or not at all. Keys are big-endian notification ids.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStorageProvider {
    db: Arc<DB>,
}

impl RocksDBStorageProvider {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "notifications" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_notifications = ColumnFamilyDescriptor::new(CF_NOTIFICATIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_notifications])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn notifications_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_NOTIFICATIONS).ok_or_else(|| {
            RelayError::internal(std::io::Error::other(
                "Notifications column family not found",
            ))
        })
    }

    /// Returns the stored bytes for a notification id.
    pub fn get(&self, id: u64) -> Result<Option<Vec<u8>>> {
        let cf = self.notifications_cf()?;
        Ok(self.db.get_cf(cf, id.to_be_bytes())?)
    }

    /// Returns every stored notification id in ascending order.
    pub fn stored_ids(&self) -> Result<Vec<u64>> {
        let cf = self.notifications_cf()?;
        let mut ids = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, _value) = item?;
            let key: [u8; 8] = key.as_ref().try_into().map_err(|_| {
                RelayError::internal(format!("Malformed notification key of {} bytes", key.len()))
            })?;
            ids.push(u64::from_be_bytes(key));
        }
        Ok(ids)
    }
}

impl<T> StorageProvider<T> for RocksDBStorageProvider {
    fn store(
        &self,
        serializer: &dyn MessageSerializer<T>,
        notifications: &[Notification<T>],
    ) -> Result<()> {
        let cf = self.notifications_cf()?;
        let mut batch = WriteBatch::default();
        for notification in notifications {
            let value = serializer.serialize(notification)?;
            batch.put_cf(cf, notification.id.to_be_bytes(), value);
        }
        self.db.write(batch)?;
        Ok(())
    }
}
