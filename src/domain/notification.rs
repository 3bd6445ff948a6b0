use serde::{Deserialize, Serialize};

/// A unit of inbound work carrying a typed payload.
///
/// Identity and contents are owned by the channel that produced it; the
/// processor only moves notifications between collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification<T> {
    pub id: u64,
    pub payload: T,
}

impl<T> Notification<T> {
    pub fn new(id: u64, payload: T) -> Self {
        Self { id, payload }
    }
}

/// The ordered group of notifications returned by one receive call.
pub type NotificationBatch<T> = Vec<Notification<T>>;
