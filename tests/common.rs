//! Test helpers and deterministic random data for `allowlist_merkle`.
//!
//! Shared by multiple `tests/*` files. It provides:
//! - A tiny, dependency-free PRNG (XorShift64) with deterministic seeding
//! - Helpers to generate EVM-style addresses in mixed case
//!
//! Usage in tests:
//! ```ignore
//! mod common;
//! use common::*;
//!
//! #[test]
//! fn my_test() {
//!     let mut rng = rng_from_env(); // honors TEST_SEED if set
//!     let members = random_addresses(10, &mut rng);
//! }
//! ```

use std::env;

#[allow(dead_code)]
pub const DEFAULT_TEST_SEED: u64 = 0xA11C_1A9E_C0FF_EE42;

/// Minimal, fast, deterministic PRNG (XorShift64).
/// Not cryptographically secure, only for tests/benches.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    #[inline]
    pub fn new(seed: u64) -> Self {
        // Avoid the all-zero lockup state.
        let s = if seed == 0 { DEFAULT_TEST_SEED } else { seed };
        Self { state: s }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Fill `buf` with pseudo-random bytes.
    #[inline]
    pub fn fill_bytes(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    /// Uniform-ish index in `0..n` (n > 0).
    #[allow(dead_code)]
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// Seed from env (`TEST_SEED`), or fallback to DEFAULT_TEST_SEED.
/// Accepts decimal or `0x` hex values.
#[allow(dead_code)]
pub fn seed_from_env() -> u64 {
    match env::var("TEST_SEED") {
        Ok(s) => {
            let s = s.trim();
            if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                u64::from_str_radix(hex, 16).unwrap_or(DEFAULT_TEST_SEED)
            } else {
                s.parse().unwrap_or(DEFAULT_TEST_SEED)
            }
        }
        Err(_) => DEFAULT_TEST_SEED,
    }
}

#[allow(dead_code)]
pub fn rng_from_env() -> XorShift64 {
    XorShift64::new(seed_from_env())
}

/// One 20-byte address with randomly mixed-case hex digits.
#[allow(dead_code)]
pub fn random_address(rng: &mut XorShift64) -> String {
    let mut raw = [0u8; 20];
    rng.fill_bytes(&mut raw);
    let mut s = String::from("0x");
    for c in hex::encode(raw).chars() {
        if c.is_ascii_alphabetic() && rng.next_u64() & 1 == 1 {
            s.push(c.to_ascii_uppercase());
        } else {
            s.push(c);
        }
    }
    s
}

/// `n` addresses (distinct with overwhelming probability).
#[allow(dead_code)]
pub fn random_addresses(n: usize, rng: &mut XorShift64) -> Vec<String> {
    (0..n).map(|_| random_address(rng)).collect()
}

/// `0x` followed by `byte` repeated 20 times.
#[allow(dead_code)]
pub fn repeated_address(byte: u8) -> String {
    format!("0x{}", hex::encode([byte; 20]))
}

/// Deterministic Fisher–Yates shuffle.
#[allow(dead_code)]
pub fn shuffle<T>(items: &mut [T], rng: &mut XorShift64) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}
