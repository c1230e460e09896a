//! The inner raw-RSA transform this crate pads around (spec section 1, 4.1).
//!
//! [`InnerEngine`] deliberately knows nothing about PKCS#1: it is the "naked"
//! `c = m^e mod n` / `m = c^d mod n` primitive that the padding layer invokes
//! once it has built an Encryption Block. Implementations are expected to
//! live outside this crate (a hardware keystore, an RSA library, a mock for
//! tests) — this crate ships none, only the trait boundary and the
//! [`EngineError`] it reports through.
use async_trait::async_trait;

use crate::request::RequestFlags;

/// Failure modes an [`InnerEngine`] may report back to the orchestrator.
///
/// Kept deliberately smaller than [`crate::error::Error`]: the engine speaks
/// only in terms of its own operation, and the orchestrator is responsible
/// for translating `NotReady`/`Busy` into the padding layer's public error
/// taxonomy alongside its own length/format failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No key has been installed yet.
    NotReady,

    /// The engine's internal backlog is full. If the request carried
    /// [`RequestFlags::MAY_BACKLOG`], the orchestrator may retry; otherwise
    /// this maps to [`crate::error::Error::Busy`].
    Busy,

    /// A working-buffer allocation failed.
    OutOfMemory,

    /// Any other engine-internal failure (e.g. a malformed key).
    Other(String),
}

/// The raw-RSA (or other trapdoor permutation) primitive this crate pads
/// around.
///
/// All four operations take and produce fixed-size, modulus-width byte
/// buffers: callers are expected to have already applied (encrypt/sign) or
/// be about to strip (decrypt/verify) the PKCS#1 padding — this trait never
/// sees plaintext shorter than the modulus.
#[async_trait]
pub trait InnerEngine: Send + Sync {
    /// Installs a public key (DER-encoded, format left to the
    /// implementation) for use by [`InnerEngine::encrypt`].
    async fn set_public_key(&self, key: &[u8]) -> Result<(), EngineError>;

    /// Installs a private key (DER-encoded, format left to the
    /// implementation) for use by [`InnerEngine::decrypt`].
    async fn set_private_key(&self, key: &[u8]) -> Result<(), EngineError>;

    /// The modulus size in bytes (`k` throughout this crate), once a key is
    /// installed. `None` before any key has been set.
    fn max_size(&self) -> Option<usize>;

    /// Raw public-key transform: `output = input^e mod n`. Used by `encrypt`
    /// and `verify`. `input` and `output` are both exactly `max_size()` bytes.
    async fn encrypt(
        &self,
        input: &[u8],
        output: &mut [u8],
        flags: RequestFlags,
    ) -> Result<(), EngineError>;

    /// Raw private-key transform: `output = input^d mod n`. Used by `decrypt`
    /// and `sign`. `input` and `output` are both exactly `max_size()` bytes.
    async fn decrypt(
        &self,
        input: &[u8],
        output: &mut [u8],
        flags: RequestFlags,
    ) -> Result<(), EngineError>;
}
