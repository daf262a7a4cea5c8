//! Proof verification.
//!
//! Folding starts at the leaf and combines with each sibling in order using
//! the same sorted-pair rule as the builder. Carried levels contribute no
//! sibling, so they need no special casing here.
//!
//! Verification is total: any well-typed input yields `true` or `false`.

use crate::hash::{Digest32, HashAlgorithm};
use crate::utils::ct_eq;

use super::hashers;
use super::types::{Proof, Root};

/// Recompute the root implied by `leaf` and `proof`.
pub fn recompute_root(algorithm: HashAlgorithm, leaf: &Digest32, proof: &Proof) -> Digest32 {
    proof
        .siblings()
        .iter()
        .fold(*leaf, |acc, sib| hashers::parent(algorithm, &acc, sib))
}

/// Check `leaf` + `proof` against `root`.
///
/// An algorithm that is not compiled into this build never verifies.
pub fn verify(algorithm: HashAlgorithm, leaf: &Digest32, proof: &Proof, root: &Root) -> bool {
    if !algorithm.is_available() {
        return false;
    }
    let got = recompute_root(algorithm, leaf, proof);
    ct_eq(&got, root.as_digest())
}

/* --------------------------------- Tests ----------------------------------- */
