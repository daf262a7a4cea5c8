//! Allowlist boundary: build once, hand out proofs, verify anywhere.
//!
//! ```
//! use allowlist_merkle::{build_whitelist, get_proof, verify_proof};
//!
//! let members = [
//!     "0x0101010101010101010101010101010101010101",
//!     "0x0202020202020202020202020202020202020202",
//! ];
//! let wl = build_whitelist(&members).unwrap();
//! let proof = get_proof(&wl, members[0]).unwrap();
//! assert!(verify_proof(members[0], &proof, &wl.root()));
//! ```

use std::collections::{BTreeMap, HashMap};

use tracing::instrument;

use crate::error::{Error, Result};
use crate::hash::{Digest32, HashAlgorithm};
use crate::identity;
use crate::merkle::{self, hashers, MerkleTree, Proof, Root};
use crate::utils::rayon_pool::{maybe_par_map, PAR_THRESHOLD};

/// Root plus one proof per deduplicated member.
///
/// Keys are the lower-cased member strings. When the input holds several
/// spellings of the same identity (case variants, or extra leading zero
/// digits) the first one in input order becomes the key.
#[derive(Clone, Debug)]
pub struct WhitelistResult {
    root: Root,
    algorithm: HashAlgorithm,
    proofs: BTreeMap<String, Proof>,
    keys_by_leaf: HashMap<Digest32, String>,
}

impl WhitelistResult {
    #[inline]
    pub fn root(&self) -> Root {
        self.root
    }

    #[inline]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Lower-cased member → proof, in key order.
    #[inline]
    pub fn proofs(&self) -> &BTreeMap<String, Proof> {
        &self.proofs
    }

    /// Number of distinct members (equals the tree's leaf count).
    #[inline]
    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    /// Resolve any spelling of a member to its published key.
    pub fn key_for(&self, member: &str) -> Option<&str> {
        let leaf = hashers::member_leaf(self.algorithm, member).ok()?;
        self.keys_by_leaf.get(&leaf).map(String::as_str)
    }
}

/// Build with the default hash (Keccak-256).
pub fn build_whitelist<S>(members: &[S]) -> Result<WhitelistResult>
where
    S: AsRef<str> + Sync,
{
    build_whitelist_with(members, HashAlgorithm::default())
}

/// Build under an explicit hash algorithm.
///
/// Each member is normalized and hashed once; the same pass yields the leaf
/// for the tree and the key it is published under.
#[instrument(level = "info", skip_all, fields(members = members.len(), hash = %algorithm))]
pub fn build_whitelist_with<S>(members: &[S], algorithm: HashAlgorithm) -> Result<WhitelistResult>
where
    S: AsRef<str> + Sync,
{
    algorithm.ensure_available()?;

    let keyed = maybe_par_map(members, PAR_THRESHOLD, |m| -> Result<(Digest32, String)> {
        let m: &str = m.as_ref();
        let enc = identity::normalize(m)?;
        Ok((hashers::leaf(algorithm, &enc), m.trim().to_ascii_lowercase()))
    })
    .into_iter()
    .collect::<Result<Vec<_>>>()?;

    // First spelling of each identity wins the key.
    let mut keys_by_leaf: HashMap<Digest32, String> = HashMap::with_capacity(keyed.len());
    let mut leaves = Vec::with_capacity(keyed.len());
    for (leaf, key) in keyed {
        leaves.push(leaf);
        keys_by_leaf.entry(leaf).or_insert(key);
    }

    let tree = MerkleTree::from_leaves(leaves, algorithm)?;

    let mut proofs = BTreeMap::new();
    for (leaf, proof) in tree.all_proofs() {
        let key = keys_by_leaf
            .get(&leaf)
            .cloned()
            .ok_or_else(|| Error::NotAMember(format!("0x{}", hex::encode(leaf))))?;
        proofs.insert(key, proof);
    }

    Ok(WhitelistResult {
        root: tree.root(),
        algorithm,
        proofs,
        keys_by_leaf,
    })
}

/// Proof for `member`, accepting any case or zero-padding variant.
pub fn get_proof(result: &WhitelistResult, member: &str) -> Result<Proof> {
    let direct = member.trim().to_ascii_lowercase();
    if let Some(p) = result.proofs.get(&direct) {
        return Ok(p.clone());
    }
    result
        .key_for(member)
        .and_then(|k| result.proofs.get(k))
        .cloned()
        .ok_or_else(|| Error::NotAMember(member.to_string()))
}

/// Verify under the default hash. Malformed identities verify as `false`.
pub fn verify_proof(identity: &str, proof: &Proof, root: &Root) -> bool {
    verify_proof_with(HashAlgorithm::default(), identity, proof, root)
}

/// Verify under an explicit hash algorithm. An algorithm missing from this
/// build verifies as `false`.
pub fn verify_proof_with(
    algorithm: HashAlgorithm,
    identity: &str,
    proof: &Proof,
    root: &Root,
) -> bool {
    if !algorithm.is_available() {
        return false;
    }
    match hashers::member_leaf(algorithm, identity) {
        Ok(leaf) => merkle::verify(algorithm, &leaf, proof, root),
        Err(_) => false,
    }
}
