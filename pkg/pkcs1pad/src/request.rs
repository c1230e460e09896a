//! Per-request flags and the request handle passed to [`crate::engine::InnerEngine`].

// Flags a caller attaches to a single encrypt/decrypt/sign/verify call.
// Named after the two flags the original `akcipher` ABI threads through
// `CRYPTO_TFM_REQ_*`: whether the call may block the calling context
// (MAY_SLEEP), and whether it may queue behind other in-flight work rather
// than failing fast with `Error::Busy` (MAY_BACKLOG).
common::define_bit_flags!(RequestFlags u32 {
    MAY_SLEEP = 1 << 0,
    MAY_BACKLOG = 1 << 1,
});

/// A single padding operation handed to the orchestrator (SPEC section 3's
/// `Request`, minus the fields that only make sense for the original's
/// callback-based completion — there is no async state machine here to
/// stash a `child_req`/`completion` in between polls, just one `.await`).
///
/// `input` is the caller-supplied plaintext/ciphertext/message/signature;
/// `output` is the caller-owned destination the orchestrator writes the
/// result into — the ciphertext/signature for `encrypt`/`sign`, the
/// recovered plaintext/message for `decrypt`/`verify`. Both are borrowed for
/// the lifetime of the call.
pub struct OpRequest<'a> {
    pub input: &'a [u8],
    pub output: &'a mut [u8],
    pub flags: RequestFlags,
}

impl<'a> OpRequest<'a> {
    pub fn new(input: &'a [u8], output: &'a mut [u8], flags: RequestFlags) -> Self {
        Self { input, output, flags }
    }
}
