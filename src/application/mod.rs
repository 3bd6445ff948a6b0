//! Application layer containing the message handoff orchestration.
//!
//! This module defines the `MessageProcessor`, which drives one
//! receive, store, commit-or-rollback cycle per call against the ports
//! declared in `domain::ports`.

pub mod processor;
