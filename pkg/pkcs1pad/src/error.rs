use std::fmt;

/// Abstract error taxonomy surfaced at the [`crate::transform`] boundary.
///
/// This mirrors the small, closed set of errno-like outcomes the original
/// kernel `akcipher` ABI surfaces (`-EINVAL`, `-EOVERFLOW`, `-ENOMEM`,
/// `-EOPNOTSUPP`, `-EBADMSG`, `-EBUSY`) rather than a free-form string error:
/// callers are expected to match on the variant, not print it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key not installed, malformed padding on decrypt/verify, or a length
    /// precondition was violated.
    Invalid,

    /// The destination buffer was too small. `required` is the size it
    /// would need to be.
    Overflow { required: usize },

    /// A working-buffer allocation failed (only reachable when the caller
    /// declined [`crate::request::RequestFlags::MAY_SLEEP`]).
    OutOfMemory,

    /// The modulus is larger than the page-size ceiling the buffer plumbing
    /// supports (see [`crate::buffer`]).
    NotSupported,

    /// Verify only: the recovered block parsed structurally but its
    /// DigestInfo prefix did not match the configured hash.
    BadMessage,

    /// The inner engine's backlog is full and the caller did not set
    /// [`crate::request::RequestFlags::MAY_BACKLOG`].
    Busy,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Invalid => write!(f, "invalid request, key, or padding"),
            Error::Overflow { required } => {
                write!(f, "destination buffer too small, need {} bytes", required)
            }
            Error::OutOfMemory => write!(f, "working buffer allocation failed"),
            Error::NotSupported => write!(f, "modulus exceeds the supported buffer size"),
            Error::BadMessage => write!(f, "DigestInfo prefix mismatch"),
            Error::Busy => write!(f, "inner engine backlog is full"),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for common::errors::Error {
    fn from(e: Error) -> Self {
        common::errors::format_err!("{}", e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
