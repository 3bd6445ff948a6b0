#![allow(dead_code)]

use notification_relay::domain::notification::Notification;
use notification_relay::domain::ports::{MessageSerializer, StorageProvider};
use notification_relay::error::{RelayError, Result};
use rand::Rng;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

/// Notifications with consecutive ids from a random start and arbitrary payloads.
pub fn anonymous_notifications(count: usize) -> Vec<Notification<i64>> {
    let mut rng = rand::thread_rng();
    let first: u64 = rng.gen_range(1..1_000_000);
    (0..count as u64)
        .map(|offset| Notification::new(first + offset, rng.gen_range(i64::MIN..=i64::MAX)))
        .collect()
}

pub fn generate_csv(path: &Path, notifications: &[Notification<i64>]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "payload"])?;
    for notification in notifications {
        wtr.write_record([notification.id.to_string(), notification.payload.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Storage that refuses every batch with the same reason.
pub struct FailingStorage {
    reason: String,
    attempts: Mutex<usize>,
}

impl FailingStorage {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
            attempts: Mutex::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl<T> StorageProvider<T> for FailingStorage {
    fn store(
        &self,
        _serializer: &dyn MessageSerializer<T>,
        _notifications: &[Notification<T>],
    ) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        Err(RelayError::internal(self.reason.clone()))
    }
}

/// Serializer that rejects one notification id.
pub struct RejectingSerializer {
    pub rejected_id: u64,
}

impl MessageSerializer<i64> for RejectingSerializer {
    fn serialize(&self, notification: &Notification<i64>) -> Result<Vec<u8>> {
        if notification.id == self.rejected_id {
            return Err(RelayError::internal(format!(
                "notification {} cannot be encoded",
                notification.id
            )));
        }
        Ok(notification.payload.to_be_bytes().to_vec())
    }
}
