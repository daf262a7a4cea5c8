//! Leaf and inner-node hashing rules.
//!
//! - **Leaves**:  `H(encoding)` where `encoding` is the 32-byte canonical form.
//! - **Parents**: `H(min(a, b) || max(a, b))`, byte-lexicographic.
//!
//! Sorting the children makes the parent independent of child order, so a
//! proof only needs sibling digests and no position bits.

use crate::hash::{Digest32, HashAlgorithm};
use crate::identity::{self, CanonicalEncoding};
use crate::error::Result;

/// Hash one canonical encoding into a leaf digest.
#[inline]
pub fn leaf(alg: HashAlgorithm, encoding: &CanonicalEncoding) -> Digest32 {
    alg.digest(encoding.as_bytes())
}

/// Normalize then hash a raw member string.
#[inline]
pub fn member_leaf(alg: HashAlgorithm, member: &str) -> Result<Digest32> {
    identity::normalize(member).map(|enc| leaf(alg, &enc))
}

/// Combine two digests with sorted-pair hashing.
#[inline]
pub fn parent(alg: HashAlgorithm, a: &Digest32, b: &Digest32) -> Digest32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    alg.digest_many([&lo[..], &hi[..]])
}

/* --------------------------------- Tests ----------------------------------- */
