//! The PKCS#1 v1.5 Encryption Block (EB) codec (spec section 4.2).
//!
//! ```text
//! EB = 0x00 || BT || PS || 0x00 || D
//! ```
//!
//! The leading `0x00` is never materialized here: the inner RSA transform
//! operates on `k - 1`-byte integers (the encoded value is strictly less
//! than the modulus), so callers reconstruct it before invoking the engine
//! (see [`crate::transform`]'s `eb_with_leading_zero`) and strip it again
//! from the engine's output before parsing.
use crate::digest_info::DigestInfoTemplate;
use crate::error::{Error, Result};

pub const BT_SIGNATURE: u8 = 0x01;
pub const BT_ENCRYPTION: u8 = 0x02;

/// Minimum EB overhead mandated by PKCS#1: the block type byte, at least 8
/// bytes of PS, the zero separator, and at least one payload byte.
const MIN_OVERHEAD: usize = 11;
const MIN_PS_LEN: usize = 8;

/// Builds the `k - 1`-byte encryption block for `encrypt` (BT = 0x02):
/// `BT || PS || 0x00 || plaintext`, with PS filled by `fill_ps` (expected to
/// write `len(PS)` cryptographically random nonzero bytes).
///
/// `k` is the modulus size in bytes. Fails with [`Error::Overflow`] if
/// `plaintext` does not leave room for the mandatory 11 bytes of overhead.
pub fn build_encrypt_block(
    k: usize,
    plaintext: &[u8],
    fill_ps: impl FnOnce(&mut [u8]),
) -> Result<Vec<u8>> {
    if plaintext.len() > k.saturating_sub(MIN_OVERHEAD) {
        return Err(Error::Overflow { required: k });
    }

    let mut eb = Vec::with_capacity(k - 1);
    eb.push(BT_ENCRYPTION);

    let ps_len = k - 3 - plaintext.len();
    let ps_start = eb.len();
    eb.resize(ps_start + ps_len, 0);
    fill_ps(&mut eb[ps_start..]);

    eb.push(0x00);
    eb.extend_from_slice(plaintext);

    debug_assert_eq!(eb.len(), k - 1);
    Ok(eb)
}

/// Builds the `k - 1`-byte signature block for `sign` (BT = 0x01):
/// `BT || 0xFF...FF || 0x00 || der_prefix? || message`.
///
/// `der_prefix` is `None` for a "raw", unprefixed signature (no hash
/// configured on the transform).
pub fn build_sign_block(k: usize, der_prefix: Option<&[u8]>, message: &[u8]) -> Result<Vec<u8>> {
    let prefix_len = der_prefix.map_or(0, <[u8]>::len);
    if message.len() + prefix_len > k.saturating_sub(MIN_OVERHEAD) {
        return Err(Error::Overflow { required: k });
    }

    let mut eb = Vec::with_capacity(k - 1);
    eb.push(BT_SIGNATURE);

    let ps_len = k - 3 - prefix_len - message.len();
    eb.resize(eb.len() + ps_len, 0xff);

    eb.push(0x00);
    if let Some(prefix) = der_prefix {
        eb.extend_from_slice(prefix);
    }
    eb.extend_from_slice(message);

    debug_assert_eq!(eb.len(), k - 1);
    Ok(eb)
}

/// Parses the `k - 1`-byte inner-engine output of a `decrypt` operation
/// (expects BT = 0x02), returning the recovered plaintext.
///
/// Every failure mode — wrong length, wrong block type, PS too short,
/// missing separator, empty payload — collapses to [`Error::Invalid`]: the
/// construction is known-vulnerable to Bleichenbacher-style oracle attacks
/// against decrypt, so no finer-grained subtype is exposed here. Upper-layer
/// protocols that call this directly are responsible for handling the
/// resulting boolean outcome in constant time.
pub fn parse_decrypt_block(k: usize, eb: &[u8]) -> Result<Vec<u8>> {
    if eb.len() != k - 1 {
        return Err(Error::Invalid);
    }
    if eb[0] != BT_ENCRYPTION {
        return Err(Error::Invalid);
    }

    let sep = match eb[1..].iter().position(|&b| b == 0x00) {
        Some(i) => i + 1,
        None => return Err(Error::Invalid),
    };

    if sep < 1 + MIN_PS_LEN || sep == eb.len() - 1 {
        return Err(Error::Invalid);
    }

    Ok(eb[sep + 1..].to_vec())
}

/// Parses the `k - 1`-byte inner-engine output of a `verify` operation
/// (expects BT = 0x01), checking the DigestInfo prefix (if a hash is
/// configured) and returning the recovered message.
///
/// Distinguishes [`Error::Invalid`] (structural failure: wrong block type,
/// short PS, missing separator) from [`Error::BadMessage`] (structurally
/// sound but the DigestInfo prefix doesn't match) — useful for
/// protocol-level auditing of *why* a signature failed.
pub fn parse_verify_block(
    k: usize,
    eb: &[u8],
    digest_info: Option<&DigestInfoTemplate>,
) -> Result<Vec<u8>> {
    if eb.len() != k - 1 {
        return Err(Error::Invalid);
    }
    if eb[0] != BT_SIGNATURE {
        return Err(Error::Invalid);
    }

    let sep = match eb[1..].iter().position(|&b| b != 0xff) {
        Some(i) => i + 1,
        None => return Err(Error::Invalid),
    };

    if sep < 1 + MIN_PS_LEN || sep == eb.len() - 1 || eb[sep] != 0x00 {
        return Err(Error::Invalid);
    }

    let mut pos = sep + 1;

    if let Some(template) = digest_info {
        let prefix = template.der_prefix;
        if eb.len() < pos + prefix.len() {
            return Err(Error::BadMessage);
        }
        if &eb[pos..pos + prefix.len()] != prefix {
            return Err(Error::BadMessage);
        }
        pos += prefix.len();
    }

    Ok(eb[pos..].to_vec())
}
