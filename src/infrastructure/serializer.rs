use crate::domain::notification::Notification;
use crate::domain::ports::MessageSerializer;
use crate::error::Result;
use serde::Serialize;

/// Encodes notifications as JSON documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonMessageSerializer;

impl<T: Serialize> MessageSerializer<T> for JsonMessageSerializer {
    fn serialize(&self, notification: &Notification<T>) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(notification)?)
    }
}
