//! Iterative, bottom-up Merkle tree construction over sorted leaves.
//!
//! - Leaves are normalized and hashed possibly in parallel (feature `rayon`).
//! - Leaf digests are sorted byte-lexicographically and deduplicated, so the
//!   root depends only on the member *set*, never on input order.
//! - The tree is built in *levels* iteratively (no recursion); each level is a
//!   barrier, pairs inside a level are independent.
//! - For odd-width levels, the last node is **carried up** unchanged.
//! - Every level is retained so proofs can be read off without rehashing.

use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::hash::{Digest32, HashAlgorithm};
use crate::identity;
use crate::utils::rayon_pool::{maybe_par_map, PAR_THRESHOLD};

use super::hashers;
use super::types::{Proof, Root};

/// Immutable tree: `levels[0]` = sorted leaves, `levels.last()` = `[root]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    algorithm: HashAlgorithm,
    levels: Vec<Vec<Digest32>>,
}

impl MerkleTree {
    /* ----------------------------- Construction ----------------------------- */

    /// Normalize, hash, deduplicate and reduce `members` into a tree.
    ///
    /// Fails with `InvalidIdentity` on the first malformed member (input
    /// order), `EmptyWhitelist` when nothing is left, and
    /// `HashFunctionUnavailable` when `algorithm` is not compiled in.
    #[instrument(level = "debug", skip_all, fields(members = members.len(), hash = %algorithm))]
    pub fn build<S>(members: &[S], algorithm: HashAlgorithm) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        algorithm.ensure_available()?;

        let encodings = maybe_par_map(members, PAR_THRESHOLD, |m| identity::normalize(m.as_ref()))
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let leaves = maybe_par_map(&encodings, PAR_THRESHOLD, |enc| {
            hashers::leaf(algorithm, enc)
        });

        Self::from_leaves(leaves, algorithm)
    }

    /// Build from precomputed leaf digests. Duplicates are dropped and the
    /// leaves are sorted before reduction.
    pub fn from_leaves(mut leaves: Vec<Digest32>, algorithm: HashAlgorithm) -> Result<Self> {
        algorithm.ensure_available()?;

        let supplied = leaves.len();
        leaves.sort_unstable();
        leaves.dedup();
        if leaves.is_empty() {
            return Err(Error::EmptyWhitelist);
        }
        if leaves.len() < supplied {
            debug!(dropped = supplied - leaves.len(), "deduplicated leaves");
        }

        let levels = build_levels(leaves, algorithm);
        let tree = Self { algorithm, levels };
        info!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            root = %tree.root(),
            "merkle tree built"
        );
        Ok(tree)
    }

    /* ------------------------------- Accessors ------------------------------- */

    pub fn root(&self) -> Root {
        // Construction guarantees a non-empty top level.
        let top = &self.levels[self.levels.len() - 1];
        Root::from_digest(top[0])
    }

    #[inline]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Sorted, unique leaf digests.
    #[inline]
    pub fn leaves(&self) -> &[Digest32] {
        &self.levels[0]
    }

    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of hashing levels above the leaves (0 for a single leaf).
    #[inline]
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    #[inline]
    pub fn levels(&self) -> &[Vec<Digest32>] {
        &self.levels
    }

    /// Position of `leaf` in the sorted leaf level.
    #[inline]
    pub fn index_of(&self, leaf: &Digest32) -> Option<usize> {
        self.levels[0].binary_search(leaf).ok()
    }

    /// Whether `member` normalizes to a leaf of this tree. Malformed input is
    /// simply not a member.
    pub fn contains(&self, member: &str) -> bool {
        hashers::member_leaf(self.algorithm, member)
            .map(|leaf| self.index_of(&leaf).is_some())
            .unwrap_or(false)
    }

    /* ---------------------------- Proof extraction ---------------------------- */

    /// Proof for a raw member string.
    ///
    /// Anything that does not resolve to a leaf, including strings that fail
    /// normalization, is reported as `NotAMember`.
    pub fn proof_for(&self, member: &str) -> Result<Proof> {
        let leaf = hashers::member_leaf(self.algorithm, member)
            .map_err(|_| Error::NotAMember(member.to_string()))?;
        self.index_of(&leaf)
            .map(|idx| self.proof_at(idx))
            .ok_or_else(|| Error::NotAMember(member.to_string()))
    }

    /// Proof for an already-hashed leaf.
    pub fn proof_for_leaf(&self, leaf: &Digest32) -> Result<Proof> {
        self.index_of(leaf)
            .map(|idx| self.proof_at(idx))
            .ok_or_else(|| Error::NotAMember(format!("0x{}", hex::encode(leaf))))
    }

    /// Proofs for every leaf, in sorted leaf order.
    pub fn all_proofs(&self) -> Vec<(Digest32, Proof)> {
        let indices: Vec<usize> = (0..self.leaf_count()).collect();
        maybe_par_map(&indices, PAR_THRESHOLD, |&i| (self.levels[0][i], self.proof_at(i)))
    }

    /// Proof for the leaf at `index` (must be in bounds).
    fn proof_at(&self, index: usize) -> Proof {
        Proof::new(path_for_index(&self.levels, index))
    }
}

/* --------------------------- Iterative build ----------------------------- */

/// Build the *next* level from a slice of digests. Odd tail is carried up.
fn next_level(curr: &[Digest32], algorithm: HashAlgorithm) -> Vec<Digest32> {
    let pairs: Vec<&[Digest32]> = curr.chunks(2).collect();
    maybe_par_map(&pairs, PAR_THRESHOLD, |pair| match pair {
        [l, r] => hashers::parent(algorithm, l, r),
        // Carry an odd tail upwards unchanged (no self-duplication).
        _ => pair[0],
    })
}

/// Build all levels bottom-up from a non-empty, sorted leaf level.
fn build_levels(leaves: Vec<Digest32>, algorithm: HashAlgorithm) -> Vec<Vec<Digest32>> {
    let mut levels = vec![leaves];
    while levels[levels.len() - 1].len() > 1 {
        let next = next_level(&levels[levels.len() - 1], algorithm);
        debug!(level = levels.len(), width = next.len(), "reduced level");
        levels.push(next);
    }
    levels
}

/* --------------------------- Path extraction ----------------------------- */

/// Sibling digests for the leaf at `index`, ordered bottom-up.
///
/// A level where the path node is the carried odd tail contributes nothing.
fn path_for_index(levels: &[Vec<Digest32>], index: usize) -> Vec<Digest32> {
    let mut idx = index;
    let mut out = Vec::with_capacity(levels.len().saturating_sub(1));

    // Every level except the root level.
    for level in levels.iter().take(levels.len().saturating_sub(1)) {
        if let Some(sib) = level.get(idx ^ 1) {
            out.push(*sib);
        }
        idx /= 2;
    }
    out
}

/* --------------------------------- Tests ----------------------------------- */
