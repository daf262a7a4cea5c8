//! Misc low-level helpers used across `allowlist_merkle`.
//!
//! - Constant-time digest comparison for root checks.
//! - Hex encode/decode of 32-byte digests in the `0x` form used by artifacts.
//! - Optional parallel helpers (see [`rayon_pool`]).

use crate::error::{Error, Result};
use crate::hash::Digest32;

pub mod rayon_pool;

/// Constant-time comparison of two byte slices.
///
/// Returns `false` if lengths differ. Otherwise performs a branchless XOR/OR fold.
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Lower-case hex with a `0x` prefix.
#[inline]
pub fn to_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 32-byte digest from hex, with or without `0x`/`0X` prefix.
pub fn parse_digest(s: &str) -> Result<Digest32> {
    let t = s.trim();
    let digits = t
        .strip_prefix("0x")
        .or_else(|| t.strip_prefix("0X"))
        .unwrap_or(t);
    if digits.len() != 64 {
        return Err(Error::InvalidArtifact(format!(
            "digest must be 64 hex chars, got {}",
            digits.len()
        )));
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(digits, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ct_eq_basics() {
        assert!(ct_eq(b"abc", b"abc"));
        assert!(!ct_eq(b"abc", b"abd"));
        assert!(!ct_eq(b"abc", b"ab"));
        assert!(ct_eq(b"", b""));
    }

    #[test]
    fn digest_hex_both_prefixes() {
        let d = [0xabu8; 32];
        let s = to_hex_prefixed(&d);
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 66);
        assert_eq!(parse_digest(&s).unwrap(), d);
        assert_eq!(parse_digest(&s[2..]).unwrap(), d);
        assert_eq!(parse_digest(&s.to_uppercase().replacen("0X", "0x", 1)).unwrap(), d);
    }

    #[test]
    fn digest_rejects_bad_width_and_digits() {
        assert!(matches!(parse_digest("0x1234"), Err(Error::InvalidArtifact(_))));
        let bad = format!("0x{}", "zz".repeat(32));
        assert!(matches!(parse_digest(&bad), Err(Error::Hex(_))));
    }
}
