pub mod envelope_writer;
pub mod notification_reader;
