//! Keccak-256 and SHA3-256 hashers on top of the RustCrypto `sha3` crate.
//!
//! ### Why Keccak-256 (not SHA3-256) by default?
//! Keccak-256 (Ethereum's `keccak256`) differs from NIST SHA3-256 only in
//! padding. Allowlist roots are checked by EVM contracts, which only offer
//! Keccak-256, so that is the default tree hash. SHA3-256 is kept for
//! off-chain consumers that standardise on NIST primitives.
//!
//! ### API
//! - `keccak256(data)` : raw Keccak-256
//! - `keccak256_many(parts)` : treat parts as concatenated
//! - `sha3_256(data)` : raw SHA3-256

use sha3::{Digest as _, Keccak256, Sha3_256};

use super::{Digest32, HashFn};

/* ------------------------------- Streaming types ------------------------------- */

#[derive(Debug, Default)]
pub struct Keccak256Hash(Keccak256);

impl HashFn for Keccak256Hash {
    #[inline]
    fn new() -> Self {
        Self(Keccak256::new())
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    #[inline]
    fn finalize(self) -> Digest32 {
        self.0.finalize().into()
    }
}

#[derive(Debug, Default)]
pub struct Sha3Hash(Sha3_256);

impl HashFn for Sha3Hash {
    #[inline]
    fn new() -> Self {
        Self(Sha3_256::new())
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    #[inline]
    fn finalize(self) -> Digest32 {
        self.0.finalize().into()
    }
}

/* ---------------------------- One-shot helpers ---------------------------- */

/// One-shot Keccak-256 of a single buffer.
#[inline]
pub fn keccak256(data: &[u8]) -> Digest32 {
    Keccak256Hash::digest(data)
}

/// Keccak-256 over multiple parts, treated as if concatenated.
pub fn keccak256_many<'a, I>(parts: I) -> Digest32
where
    I: IntoIterator<Item = &'a [u8]>,
{
    Keccak256Hash::digest_many(parts)
}

/// One-shot SHA3-256 of a single buffer.
#[inline]
pub fn sha3_256(data: &[u8]) -> Digest32 {
    Sha3Hash::digest(data)
}

/* ---------------------------------- Tests ----------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_empty_matches_vector() {
        // Known Keccak-256("") from Ethereum tooling.
        let expect = hex_literal::hex!(
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(keccak256(&[]), expect);
    }

    #[test]
    fn sha3_empty_matches_vector() {
        // FIPS 202 SHA3-256("").
        let expect = hex_literal::hex!(
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(sha3_256(&[]), expect);
    }

    #[test]
    fn many_equals_concat() {
        let a = keccak256_many([b"ab".as_ref(), b"c"]);
        let b = keccak256(b"abc");
        assert_eq!(a, b);
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut h = Keccak256Hash::new();
        h.update(b"hello ");
        h.update(b"world");
        assert_eq!(h.finalize(), keccak256(b"hello world"));
    }
}
