//! BLAKE3-256 hasher (feature `blake3`).
//!
//! Plain (unkeyed) BLAKE3 so that a tree committed under this algorithm can
//! be reproduced by any stock BLAKE3 implementation.

use super::{Digest32, HashFn};

#[derive(Debug)]
pub struct Blake3Hash(::blake3::Hasher);

impl HashFn for Blake3Hash {
    #[inline]
    fn new() -> Self {
        Self(::blake3::Hasher::new())
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    #[inline]
    fn finalize(self) -> Digest32 {
        *self.0.finalize().as_bytes()
    }
}

/// One-shot BLAKE3-256.
#[inline]
pub fn blake3_256(data: &[u8]) -> Digest32 {
    *::blake3::hash(data).as_bytes()
}
