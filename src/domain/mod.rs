pub mod envelope;
pub mod notification;
pub mod ports;
pub mod transaction;
