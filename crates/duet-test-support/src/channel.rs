//! Test channels — mock `StateChannel` implementations for tests.

use std::sync::Mutex;

use duet_core::channel::StateChannel;
use duet_core::error::DomainError;

/// A channel that opens with a configured blob and records every handoff.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    inbound: Option<String>,
    written: Mutex<Vec<String>>,
}

impl RecordingChannel {
    /// Create a channel that reads back `inbound` on every `read` call.
    #[must_use]
    pub fn new(inbound: Option<String>) -> Self {
        Self {
            inbound,
            written: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all blobs that were written.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }

    /// Returns the most recent handoff, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_written(&self) -> Option<String> {
        self.written.lock().unwrap().last().cloned()
    }
}

impl StateChannel for RecordingChannel {
    fn read(&self) -> Result<Option<String>, DomainError> {
        Ok(self.inbound.clone())
    }

    fn write(&self, blob: &str) -> Result<(), DomainError> {
        self.written.lock().unwrap().push(blob.to_owned());
        Ok(())
    }
}

/// A channel whose every read and write fails. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingChannel;

impl StateChannel for FailingChannel {
    fn read(&self) -> Result<Option<String>, DomainError> {
        Err(DomainError::Infrastructure("clipboard unavailable".into()))
    }

    fn write(&self, _blob: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("clipboard unavailable".into()))
    }
}
