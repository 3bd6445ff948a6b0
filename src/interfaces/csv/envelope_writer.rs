use crate::domain::envelope::MessageEnvelope;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct EnvelopeRecord<'a> {
    transaction: Option<u64>,
    message: Option<&'a str>,
}

/// Writes one `transaction,message` CSV row per envelope.
pub struct EnvelopeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> EnvelopeWriter<W> {
    /// Creates the writer and emits the header row.
    pub fn new(sink: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        writer.write_record(["transaction", "message"])?;
        Ok(Self { writer })
    }

    pub fn write_envelope(&mut self, envelope: &MessageEnvelope) -> Result<()> {
        self.writer.serialize(EnvelopeRecord {
            transaction: envelope.transaction.map(|tx| tx.id()),
            message: envelope.message.as_deref(),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
