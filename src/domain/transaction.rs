use std::fmt;

/// Opaque handle correlating one batch with its commit or rollback.
///
/// Created by a [`TransactionTracker`](super::ports::TransactionTracker) and
/// handed back to the channel untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationTransaction {
    id: u64,
}

impl NotificationTransaction {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for NotificationTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{}", self.id)
    }
}
