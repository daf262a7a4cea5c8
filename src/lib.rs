//! allowlist_merkle: Merkle commitments over allowlisted identities.
//!
//! Build a sorted-pair Merkle tree over a batch of `0x` hex identities,
//! publish the root, hand each member a proof, and verify `(identity, proof,
//! root)` anywhere without the member set.
//!
//! Layout:
//! - [`identity`]  : member string → 32-byte canonical encoding
//! - [`hash`]      : Keccak-256 / SHA3-256 / BLAKE3 behind [`HashAlgorithm`]
//! - [`merkle`]    : tree build, proof extraction, verification
//! - [`whitelist`] : batch boundary (`build_whitelist`, `get_proof`, `verify_proof`)
//! - [`artifacts`] : `root.json` / `proofs.json` encoding and atomic writes
//! - [`source`]    : where the raw member list comes from
//! - [`config`]    : environment configuration for the binary
//!
//! Features:
//! - `rayon`  : parallel leaf hashing, level reduction and proof extraction
//! - `blake3` : BLAKE3 as a selectable tree hash (default on)

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

pub mod artifacts;
pub mod config;
pub mod error;
pub mod hash;
pub mod identity;
pub mod merkle;
pub mod source;
pub mod utils;
pub mod whitelist;

pub use error::{Error, Result};
pub use hash::{Digest32, HashAlgorithm};
pub use identity::{normalize, CanonicalEncoding};
pub use merkle::{MerkleTree, Proof, Root};
pub use whitelist::{
    build_whitelist, build_whitelist_with, get_proof, verify_proof, verify_proof_with,
    WhitelistResult,
};

/// Return a static list of compile-time feature flags that were enabled.
pub fn enabled_features() -> &'static [&'static str] {
    const FEATS: &[&str] = &[
        #[cfg(feature = "rayon")]
        "rayon",
        #[cfg(feature = "blake3")]
        "blake3",
    ];
    FEATS
}
