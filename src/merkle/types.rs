//! Merkle core types: [`Root`] and [`Proof`].
//!
//! Both serialize as `0x`-prefixed lower-case hex so they can be dropped into
//! JSON artifacts and contract call data unchanged.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hash::Digest32;
use crate::utils::{parse_digest, to_hex_prefixed};

/// Root commitment of a tree: the only value that needs publishing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Root(#[serde(with = "serde_digest")] Digest32);

impl Root {
    #[inline]
    pub const fn from_digest(d: Digest32) -> Self {
        Self(d)
    }

    #[inline]
    pub fn as_digest(&self) -> &Digest32 {
        &self.0
    }

    /// Lower-case hex without prefix (the `root.json` form).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex_prefixed(&self.0))
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Root({self})")
    }
}

impl FromStr for Root {
    type Err = Error;

    /// Accepts hex with or without `0x`.
    fn from_str(s: &str) -> Result<Self> {
        parse_digest(s).map(Root)
    }
}

impl From<Digest32> for Root {
    fn from(d: Digest32) -> Self {
        Root(d)
    }
}

/// Membership proof: sibling digests ordered from the leaf level upwards.
///
/// No left/right flags are carried; sorted-pair hashing makes them redundant.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof {
    #[serde(with = "serde_digest_list")]
    siblings: Vec<Digest32>,
}

impl Proof {
    #[inline]
    pub fn new(siblings: Vec<Digest32>) -> Self {
        Self { siblings }
    }

    #[inline]
    pub fn siblings(&self) -> &[Digest32] {
        &self.siblings
    }

    /// Mutable access, mostly for tamper tests.
    #[inline]
    pub fn siblings_mut(&mut self) -> &mut Vec<Digest32> {
        &mut self.siblings
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// `0x`-prefixed hex of every sibling (the `proofs.json` form).
    pub fn to_hex(&self) -> Vec<String> {
        self.siblings.iter().map(|d| to_hex_prefixed(d)).collect()
    }

    /// Parse siblings from hex strings (prefix optional).
    pub fn from_hex<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        let siblings = items
            .iter()
            .map(|s| parse_digest(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { siblings })
    }
}

impl fmt::Debug for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_hex()).finish()
    }
}

impl From<Vec<Digest32>> for Proof {
    fn from(siblings: Vec<Digest32>) -> Self {
        Self { siblings }
    }
}

/* ------------------------------- serde helpers ------------------------------- */

mod serde_digest {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Digest32, s: S) -> core::result::Result<S::Ok, S::Error> {
        s.serialize_str(&to_hex_prefixed(d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> core::result::Result<Digest32, D::Error> {
        let s = String::deserialize(d)?;
        parse_digest(&s).map_err(serde::de::Error::custom)
    }
}

mod serde_digest_list {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        list: &[Digest32],
        s: S,
    ) -> core::result::Result<S::Ok, S::Error> {
        s.collect_seq(list.iter().map(|d| to_hex_prefixed(d)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> core::result::Result<Vec<Digest32>, D::Error> {
        let items = Vec::<String>::deserialize(d)?;
        items
            .iter()
            .map(|s| parse_digest(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

/* --------------------------------- Tests ----------------------------------- */
