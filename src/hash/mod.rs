//! Hash abstraction used by the Merkle engine.
//!
//! This module provides:
//! - `HashFn`: a small trait for 256-bit hash functions with streaming update.
//! - Implementations for Keccak-256 (default), SHA3-256 and, with the `blake3`
//!   feature, BLAKE3.
//! - `HashAlgorithm`: a runtime selector so the tree, the verifier and the CLI
//!   all agree on a single primitive.
//!
//! ### Digest size
//! Every supported primitive yields a 32-byte digest (`[u8; 32]`), which is
//! also the leaf width. Keeping one width means proofs are plain lists of
//! `Digest32` regardless of the algorithm.
//!
//! ### No domain separation
//! Leaves and inner nodes are hashed without prefixes. This keeps roots
//! compatible with the common `keccak256(sorted(a, b))` on-chain verifiers.
//! Second-preimage confusion between a 32-byte leaf encoding and a 64-byte
//! node preimage is impossible because the preimage lengths differ.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

pub mod keccak;

#[cfg(feature = "blake3")]
pub mod blake3;

/// A 256-bit digest used across the crate.
pub type Digest32 = [u8; 32];

/// Minimal interface for a streaming 256-bit hash.
pub trait HashFn: Sized + fmt::Debug {
    /// Create a fresh hasher.
    fn new() -> Self;

    /// Feed additional bytes.
    fn update(&mut self, data: &[u8]);

    /// Finalize and return the 32-byte digest. Consumes `self`.
    fn finalize(self) -> Digest32;

    /// One-shot convenience over `new` + `update` + `finalize`.
    #[inline]
    fn digest(data: &[u8]) -> Digest32 {
        let mut h = Self::new();
        h.update(data);
        h.finalize()
    }

    /// Hash several chunks as if concatenated.
    #[inline]
    fn digest_many<'a, I>(parts: I) -> Digest32
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut h = Self::new();
        for p in parts {
            h.update(p);
        }
        h.finalize()
    }
}

/* ------------------------------ Algorithm choice ------------------------------ */

/// The hash primitive a tree is committed under.
///
/// Builder and verifier must use the same value; a mismatch silently yields
/// roots that never verify.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// Ethereum-style Keccak-256 (pre-NIST padding).
    #[default]
    Keccak256,
    /// NIST SHA3-256.
    Sha3_256,
    /// BLAKE3-256; requires the `blake3` feature.
    Blake3,
}

impl HashAlgorithm {
    /// Every algorithm name this build knows about, available or not.
    pub const ALL: &'static [HashAlgorithm] = &[
        HashAlgorithm::Keccak256,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Blake3,
    ];

    /// Stable lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Whether the primitive was compiled into this build.
    pub fn is_available(self) -> bool {
        match self {
            HashAlgorithm::Keccak256 | HashAlgorithm::Sha3_256 => true,
            HashAlgorithm::Blake3 => cfg!(feature = "blake3"),
        }
    }

    /// Fail with `HashFunctionUnavailable` unless the primitive is usable.
    pub fn ensure_available(self) -> Result<Self> {
        if self.is_available() {
            Ok(self)
        } else {
            Err(Error::HashFunctionUnavailable(format!(
                "{} (crate built without the `{}` feature)",
                self.name(),
                self.name()
            )))
        }
    }

    /// Hash `parts` as if concatenated.
    ///
    /// Callers check availability first: tree builds go through
    /// [`HashAlgorithm::ensure_available`] and verification returns `false`
    /// for an unavailable algorithm. The non-`blake3` arm below only keeps the
    /// match total and is never reached from those paths.
    #[inline]
    pub fn digest_many<'a, I>(self, parts: I) -> Digest32
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        match self {
            HashAlgorithm::Keccak256 => keccak::Keccak256Hash::digest_many(parts),
            HashAlgorithm::Sha3_256 => keccak::Sha3Hash::digest_many(parts),
            #[cfg(feature = "blake3")]
            HashAlgorithm::Blake3 => self::blake3::Blake3Hash::digest_many(parts),
            #[cfg(not(feature = "blake3"))]
            HashAlgorithm::Blake3 => keccak::Keccak256Hash::digest_many(parts),
        }
    }

    /// One-shot digest of a single buffer.
    #[inline]
    pub fn digest(self, data: &[u8]) -> Digest32 {
        self.digest_many([data])
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    /// Parse a name (case-insensitive, `_` and `-` interchangeable) and check
    /// the primitive is compiled in.
    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        let alg = match norm.as_str() {
            "keccak256" | "keccak-256" | "keccak" => HashAlgorithm::Keccak256,
            "sha3-256" | "sha3" => HashAlgorithm::Sha3_256,
            "blake3" | "blake3-256" => HashAlgorithm::Blake3,
            _ => return Err(Error::HashFunctionUnavailable(format!("unknown hash {s:?}"))),
        };
        alg.ensure_available()
    }
}

/* ----------------------------------- Tests ----------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_length_is_32() {
        for alg in HashAlgorithm::ALL.iter().filter(|a| a.is_available()) {
            assert_eq!(alg.digest(b"").len(), 32, "{alg}");
        }
    }

    #[test]
    fn algorithms_disagree_on_same_input() {
        let k = HashAlgorithm::Keccak256.digest(b"hello");
        let s = HashAlgorithm::Sha3_256.digest(b"hello");
        assert_ne!(k, s, "keccak and sha3 differ only in padding but must not collide");
    }

    #[test]
    fn many_equals_concat() {
        let parts = [b"abc" as &[u8], b"def", b"ghi"];
        for alg in [HashAlgorithm::Keccak256, HashAlgorithm::Sha3_256] {
            assert_eq!(alg.digest_many(parts), alg.digest(b"abcdefghi"));
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("keccak256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Keccak256);
        assert_eq!("KECCAK-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Keccak256);
        assert_eq!("sha3_256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha3_256);
        for alg in HashAlgorithm::ALL.iter().filter(|a| a.is_available()) {
            assert_eq!(alg.name().parse::<HashAlgorithm>().unwrap(), *alg);
        }
    }

    #[test]
    fn unknown_name_is_unavailable() {
        let err = "md5".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(err, Error::HashFunctionUnavailable(_)));
        assert!(err.is_fatal());
    }

    #[cfg(not(feature = "blake3"))]
    #[test]
    fn blake3_unavailable_without_feature() {
        let err = "blake3".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(err, Error::HashFunctionUnavailable(_)));
    }

    #[test]
    fn default_is_keccak() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Keccak256);
    }
}
