//! Sorted-pair Merkle tree: build, open, verify.
//!
//! Public API:
//!
//! - [`MerkleTree::build`]     : members → tree (normalize, hash, dedup, sort, reduce)
//! - [`MerkleTree::proof_for`] : sibling path for one member
//! - [`verify`]                : recompute a root from `(leaf, proof)` and compare
//!
//! ### Design
//! * **Digest:** 32 bytes under a [`HashAlgorithm`] (Keccak-256 by default).
//! * **Leaves:** `H(pad32(identity))`, sorted byte-lexicographically and
//!   deduplicated before reduction; the root commits to the member *set*.
//! * **Parents:** `H(min(a, b) || max(a, b))`. Proofs carry no side bits.
//! * **Odd widths:** the unpaired last node is carried to the next level
//!   unchanged. Its path simply has no sibling at that level, so proofs for
//!   carried leaves are shorter than `depth`.
//!
//! These rules match `merkletreejs` with `{ sort: true }` over hashed leaves
//! and the usual OpenZeppelin-style `MerkleProof.verify` on-chain, as long as
//! the leaf encoding agrees.
//!
//! [`HashAlgorithm`]: crate::hash::HashAlgorithm

pub mod hashers;
pub mod tree;
pub mod types;
pub mod verify;

pub use tree::MerkleTree;
pub use types::{Proof, Root};
pub use verify::{recompute_root, verify};
