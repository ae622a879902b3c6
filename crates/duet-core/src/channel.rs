//! Transport seams the engine reads state from and hands state off to.

use crate::error::DomainError;

/// Out-of-band carrier of the authoritative state blob between two clients.
///
/// `read` is the entry side (the `?gamedata=` link parameter); `write` is the
/// handoff side (the clipboard). There is no acknowledgement and no retry:
/// whatever was written last is what the partner receives.
pub trait StateChannel: Send + Sync {
    /// Returns the blob the client was opened with, already percent-decoded,
    /// or `None` if no game data was supplied.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the transport cannot be read.
    fn read(&self) -> Result<Option<String>, DomainError>;

    /// Hands off a freshly encoded blob.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the transport rejects the write.
    fn write(&self, blob: &str) -> Result<(), DomainError>;
}

/// Source of candidate board words.
pub trait WordSource: Send + Sync {
    /// Returns the full candidate list; the caller draws the board from it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the list cannot be loaded.
    fn words(&self) -> Result<Vec<String>, DomainError>;
}
