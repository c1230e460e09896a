//! PKCS#1 v1.5 padding (RFC 8017 sections 7.2 and 8.2, RFC 2313) layered
//! over an external raw-RSA (or other trapdoor permutation) transform.
//!
//! This crate implements only the padding/unpadding and framing logic; it
//! has no RSA (or other public-key) math of its own. Callers supply that
//! through [`engine::InnerEngine`] — a hardware keystore, a software
//! bignum library, a test double.
//!
//! The four public operations live on [`transform::PaddedTransform`]:
//! `encrypt`/`decrypt` implement RFC 8017 7.2, `sign`/`verify` implement
//! 8.2. [`digest_info`] holds the DigestInfo DER prefixes `sign`/`verify`
//! splice around a message digest when a hash is configured.
pub mod block;
pub mod buffer;
pub mod digest_info;
pub mod engine;
pub mod error;
pub mod registry;
pub mod request;
pub mod transform;

pub use engine::{EngineError, InnerEngine};
pub use error::{Error, Result};
pub use registry::{EngineRegistry, Template};
pub use request::{OpRequest, RequestFlags};
pub use transform::PaddedTransform;
