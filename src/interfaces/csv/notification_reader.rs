use crate::domain::notification::Notification;
use crate::error::{RelayError, Result};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads notifications from a CSV source with an `id, payload` header.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<Notification<T>>`. It handles whitespace trimming and flexible
/// record lengths automatically.
pub struct NotificationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> NotificationReader<R> {
    /// Creates a new `NotificationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes notifications.
    ///
    /// A malformed row yields an error for that row only; later rows are
    /// still read.
    pub fn notifications<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<Notification<T>>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(RelayError::from))
    }
}
