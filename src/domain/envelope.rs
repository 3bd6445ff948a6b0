use super::transaction::NotificationTransaction;

/// Status text carried by the envelope of a committed batch.
pub const COMMITTED_MESSAGE: &str = "Notifications Committed";

/// The outcome of one processing cycle.
///
/// Both fields are absent when the channel returned an empty batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageEnvelope {
    pub message: Option<String>,
    pub transaction: Option<NotificationTransaction>,
}

impl MessageEnvelope {
    pub fn committed(transaction: NotificationTransaction) -> Self {
        Self {
            message: Some(COMMITTED_MESSAGE.to_string()),
            transaction: Some(transaction),
        }
    }

    pub fn rolled_back(reason: impl Into<String>, transaction: NotificationTransaction) -> Self {
        Self {
            message: Some(reason.into()),
            transaction: Some(transaction),
        }
    }

    /// True when the cycle saw an empty batch.
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.transaction.is_none()
    }
}
