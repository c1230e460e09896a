//! Buffer plumbing (spec section 4.3).
//!
//! The original construction presents its padded payload to the inner RSA
//! transform through a scatter/gather chain because the kernel ABI it is
//! built on (`struct scatterlist`) requires any one contiguous region to fit
//! within a single page; a payload whose backing allocation straddles a page
//! boundary has to be split into two segments.
//!
//! [`crate::engine::InnerEngine`] instead takes plain contiguous byte slices
//! — there is no host-allocator ABI to satisfy in safe Rust, so the
//! scatter/gather chain collapses to an ordinary `Vec<u8>` built by the
//! orchestrator. What *does* carry over is the policy the page-based
//! plumbing encoded: requests whose modulus exceeds one page are rejected
//! up front rather than silently handled by an ever-growing segment chain.
//! [`validate_page_budget`] is that check.

use crate::error::{Error, Result};

/// Ceiling a modulus size (`k`, in bytes) must stay under for an operation
/// to be supported. Mirrors `PAGE_SIZE` in the original, which bounds how
/// many scatterlist segments a single padded buffer can ever need (one, or
/// two if it straddles a page boundary).
pub const PAGE_SIZE: usize = 4096;

/// Rejects moduli whose padded buffer could not be represented within the
/// page-based scatter/gather budget the construction assumes.
pub fn validate_page_budget(modulus_size_bytes: usize) -> Result<()> {
    if modulus_size_bytes > PAGE_SIZE {
        return Err(Error::NotSupported);
    }
    Ok(())
}

/// How many scatterlist segments a `len`-byte region starting at byte offset
/// `page_offset` within a `PAGE_SIZE` page would need: one if it fits before
/// the next page boundary, two (`first`, `second`) if it straddles one.
///
/// Preserved as a pure, testable function standing in for
/// `pkcs1pad_sg_set_buf` from the original; nothing in this crate currently
/// calls it with a `page_offset` other than 0; real callers embedding this
/// crate behind an ABI that still allocates page-addressed buffers can reuse
/// it instead of reintroducing segment arithmetic of their own.
pub fn segment_plan(page_offset: usize, len: usize) -> SegmentPlan {
    debug_assert!(page_offset < PAGE_SIZE);

    if page_offset + len <= PAGE_SIZE {
        SegmentPlan::Single(len)
    } else {
        let first = PAGE_SIZE - page_offset;
        SegmentPlan::Split(first, len - first)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPlan {
    Single(usize),
    Split(usize, usize),
}
