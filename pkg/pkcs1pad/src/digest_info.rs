//! The DigestInfo table (RFC 8017 section 9.2 / RFC 3447 appendix A.2.4).
//!
//! Each entry is the DER encoding of
//! `DigestInfo ::= SEQUENCE { digestAlgorithm AlgorithmIdentifier, digest OCTET STRING }`
//! up to and including the length octet of the trailing OCTET STRING — the
//! digest bytes themselves are appended by the caller at sign/verify time.
//!
//! The table is closed and immutable; a match over a fixed array is the
//! appropriate data structure (there is no case for runtime registration of
//! new hashes, so a `HashMap` would be overkill for seven entries).

/// A single named entry in the DigestInfo table.
#[derive(Debug, Clone, Copy)]
pub struct DigestInfoTemplate {
    pub name: &'static str,
    pub der_prefix: &'static [u8],
}

// Byte-exact per RFC 3447 appendix A.2.4 / RFC 4880 section 5.2.2. Do not
// "clean up" these arrays — every byte, including the explicit NULL
// parameters octet, is part of the wire format.
const MD5: &[u8] = &[
    0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x05, 0x05, 0x00,
    0x04, 0x10,
];

const SHA1: &[u8] = &[
    0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04, 0x14,
];

const RMD160: &[u8] = &[
    0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x24, 0x03, 0x02, 0x01, 0x05, 0x00, 0x04, 0x14,
];

const SHA224: &[u8] = &[
    0x30, 0x2d, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x04, 0x05,
    0x00, 0x04, 0x1c,
];

const SHA256: &[u8] = &[
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01, 0x05,
    0x00, 0x04, 0x20,
];

const SHA384: &[u8] = &[
    0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02, 0x05,
    0x00, 0x04, 0x30,
];

const SHA512: &[u8] = &[
    0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03, 0x05,
    0x00, 0x04, 0x40,
];

const TEMPLATES: &[DigestInfoTemplate] = &[
    DigestInfoTemplate { name: "md5", der_prefix: MD5 },
    DigestInfoTemplate { name: "sha1", der_prefix: SHA1 },
    DigestInfoTemplate { name: "rmd160", der_prefix: RMD160 },
    DigestInfoTemplate { name: "sha224", der_prefix: SHA224 },
    DigestInfoTemplate { name: "sha256", der_prefix: SHA256 },
    DigestInfoTemplate { name: "sha384", der_prefix: SHA384 },
    DigestInfoTemplate { name: "sha512", der_prefix: SHA512 },
];

/// Looks up the DigestInfo DER prefix for a (lowercase) hash name.
///
/// Returns `None` if `name` is not one of the seven supported hashes.
pub fn lookup(name: &str) -> Option<&'static DigestInfoTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}
