//! Error type for allowlist_merkle.
//!
//! The first four variants are the engine's taxonomy and are what callers of
//! the build / proof APIs match on. The remaining variants only come out of
//! the tooling layer (member sources, artifact files).
//!
//! Verification is deliberately absent here: a wrong proof is `false`, never
//! an `Err`.

use thiserror::Error;

/// Canonical error for the crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Member string is not a `0x`-prefixed hex identity of at most 32 bytes.
    #[error("invalid identity {input:?}: {reason}")]
    InvalidIdentity { input: String, reason: &'static str },

    /// No members left after deduplication.
    #[error("whitelist is empty")]
    EmptyWhitelist,

    /// Proof requested for an identity that has no leaf in the tree.
    #[error("not a member: {0}")]
    NotAMember(String),

    /// Requested hash primitive is unknown or not compiled in.
    #[error("hash function unavailable: {0}")]
    HashFunctionUnavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Artifact parsed but has the wrong shape (digest width, prefix, ...).
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),
}

impl Error {
    pub(crate) fn invalid_identity(input: &str, reason: &'static str) -> Self {
        Error::InvalidIdentity {
            input: input.to_string(),
            reason,
        }
    }

    /// Whether the failure aborts a build outright rather than rejecting one input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::EmptyWhitelist | Error::HashFunctionUnavailable(_))
    }
}

/// Convenience alias for results that use [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
