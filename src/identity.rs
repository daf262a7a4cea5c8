//! Identity normalization: raw member string → fixed-width canonical bytes.
//!
//! An identity is a `0x`-prefixed hex string (an EVM address in practice).
//! Normalization trims whitespace, lower-cases, strips the prefix and
//! left-pads the hex digits with zero nibbles to [`ENCODING_BYTES`]. A 20-byte
//! address therefore becomes 12 zero bytes followed by the address, which is
//! what `abi.encode(address)` produces on-chain.
//!
//! Padding is done at nibble granularity, so odd-length inputs such as
//! `0xabc` are accepted and encode as `...0abc`.

use core::fmt;

use crate::error::{Error, Result};

/// Width (in bytes) of a canonical encoding and of every leaf preimage.
pub const ENCODING_BYTES: usize = 32;

/// Longest accepted identity, in hex digits after the prefix.
pub const MAX_HEX_DIGITS: usize = ENCODING_BYTES * 2;

/// Fixed-width, case-normalized byte form of an identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalEncoding([u8; ENCODING_BYTES]);

impl CanonicalEncoding {
    /// Wrap already-padded bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; ENCODING_BYTES]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ENCODING_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for CanonicalEncoding {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CanonicalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalEncoding(0x{})", hex::encode(self.0))
    }
}

/// Lower-cased, trimmed member string; the key proofs are published under.
///
/// Validates the identity the same way [`normalize`] does.
pub fn canonical_member(member: &str) -> Result<String> {
    let lower = member.trim().to_ascii_lowercase();
    hex_digits(member, &lower)?;
    Ok(lower)
}

/// Map a member string to its canonical encoding.
///
/// Leading zero digits are not significant: `0xaaa`, `0x0aaa` and the fully
/// padded 64-digit form all map to the same encoding, so they are one member.
pub fn normalize(member: &str) -> Result<CanonicalEncoding> {
    let lower = member.trim().to_ascii_lowercase();
    let digits = hex_digits(member, &lower)?;

    // Left-pad to a full 64-nibble string, then decode in one go.
    let mut padded = String::with_capacity(MAX_HEX_DIGITS);
    padded.extend(std::iter::repeat('0').take(MAX_HEX_DIGITS - digits.len()));
    padded.push_str(digits);

    let mut out = [0u8; ENCODING_BYTES];
    hex::decode_to_slice(&padded, &mut out)
        .map_err(|_| Error::invalid_identity(member, "non-hex digit"))?;
    Ok(CanonicalEncoding(out))
}

/// Strip the prefix from an already lower-cased identity and validate the digits.
fn hex_digits<'a>(original: &str, lower: &'a str) -> Result<&'a str> {
    let digits = lower
        .strip_prefix("0x")
        .ok_or_else(|| Error::invalid_identity(original, "missing 0x prefix"))?;
    if digits.is_empty() {
        return Err(Error::invalid_identity(original, "no hex digits after 0x"));
    }
    if digits.len() > MAX_HEX_DIGITS {
        return Err(Error::invalid_identity(original, "longer than 32 bytes"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::invalid_identity(original, "non-hex digit"));
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1234567890AbCdEf1234567890aBcDeF12345678";

    #[test]
    fn address_is_left_padded() {
        let enc = normalize(ADDR).unwrap();
        let bytes = enc.as_bytes();
        assert_eq!(bytes[..12], [0u8; 12]);
        assert_eq!(
            hex::encode(&bytes[12..]),
            "1234567890abcdef1234567890abcdef12345678"
        );
    }

    #[test]
    fn case_variants_collapse() {
        let a = normalize(ADDR).unwrap();
        let b = normalize(&ADDR.to_lowercase()).unwrap();
        let c = normalize(&ADDR.to_uppercase()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(
            canonical_member(ADDR).unwrap(),
            "0x1234567890abcdef1234567890abcdef12345678"
        );
    }

    #[test]
    fn odd_nibble_count_pads_by_nibble() {
        let enc = normalize("0xAAA").unwrap();
        let bytes = enc.as_bytes();
        assert_eq!(bytes[..30], [0u8; 30]);
        assert_eq!(bytes[30..], [0x0a, 0xaa]);
    }

    #[test]
    fn leading_zero_digits_are_not_significant() {
        let short = normalize("0xaaa").unwrap();
        assert_eq!(normalize("0x0aaa").unwrap(), short);
        assert_eq!(normalize(&format!("0x{:0>64}", "aaa")).unwrap(), short);
        // The published keys still differ; only the encoding collapses.
        assert_ne!(canonical_member("0xaaa").unwrap(), canonical_member("0x0aaa").unwrap());
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(normalize("  0xab\n").unwrap(), normalize("0xab").unwrap());
        assert_eq!(canonical_member(" 0xAB ").unwrap(), "0xab");
    }

    #[test]
    fn full_width_accepted() {
        let s = format!("0x{}", "f".repeat(64));
        assert_eq!(normalize(&s).unwrap().as_bytes(), &[0xffu8; 32]);
    }

    #[test]
    fn malformed_inputs_rejected() {
        for bad in [
            "",
            "0x",
            "1234",
            "0xNOTINTREE",
            "0x12 34",
            &format!("0x{}", "1".repeat(65)),
        ] {
            let err = normalize(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidIdentity { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }
}
