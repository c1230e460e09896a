//! Template name parsing and transform construction (spec section 4.6).
//!
//! Mirrors `pkcs1pad_create` from the original construction: given a
//! template instantiation string of the form `pkcs1pad(<inner>[,<hash>])`,
//! looks up the named inner primitive through a caller-supplied registry,
//! builds a [`PaddedTransform`] around it, and reports the name the result
//! should be published under.
use std::sync::Arc;

use crate::engine::InnerEngine;
use crate::error::{Error, Result};
use crate::transform::PaddedTransform;

/// Maximum length of a registered algorithm name, mirroring
/// `CRYPTO_MAX_ALG_NAME` from the original construction. Both the
/// instantiation template string and the name synthesized for publication
/// are checked against it.
pub const MAX_ALG_NAME: usize = 128;

/// A parsed `pkcs1pad(<inner>[,<hash>])` template instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    pub inner_name: &'a str,
    pub hash_name: Option<&'a str>,
}

/// Parses a template instantiation string such as `pkcs1pad(rsa)` or
/// `pkcs1pad(rsa,sha256)`.
///
/// Returns [`Error::Invalid`] if the string isn't of that form, has an
/// empty inner or hash name, or exceeds [`MAX_ALG_NAME`].
pub fn parse_template(spec: &str) -> Result<Template<'_>> {
    if spec.len() > MAX_ALG_NAME {
        return Err(Error::Invalid);
    }

    let inner = spec
        .strip_prefix("pkcs1pad(")
        .and_then(|s| s.strip_suffix(')'))
        .ok_or(Error::Invalid)?;

    if inner.is_empty() {
        return Err(Error::Invalid);
    }

    match inner.split_once(',') {
        Some((inner_name, hash_name)) => {
            if inner_name.is_empty() || hash_name.is_empty() || hash_name.contains(',') {
                return Err(Error::Invalid);
            }
            Ok(Template { inner_name, hash_name: Some(hash_name) })
        }
        None => Ok(Template { inner_name: inner, hash_name: None }),
    }
}

/// The name a constructed transform is published under:
/// `pkcs1pad(<inner driver name>[,<hash>])`, mirroring the original
/// construction's `cra_name`/`cra_driver_name` composition.
///
/// `inner_driver_name` is the concrete driver name the inner engine's
/// registry reports for the instance it built, which may differ from the
/// generic `inner_name` that was requested (e.g. a concrete `rsa-generic`
/// backing a request for plain `rsa`). Fails with [`Error::Invalid`] if the
/// composed name would exceed [`MAX_ALG_NAME`] — the original construction
/// rejects registration in exactly this case rather than truncating.
pub fn compose_name(inner_driver_name: &str, hash_name: Option<&str>) -> Result<String> {
    let name = match hash_name {
        Some(hash) => format!("pkcs1pad({},{})", inner_driver_name, hash),
        None => format!("pkcs1pad({})", inner_driver_name),
    };
    if name.len() > MAX_ALG_NAME {
        return Err(Error::Invalid);
    }
    Ok(name)
}

/// Looks up and instantiates the named inner primitive.
///
/// This crate has no opinion on how inner engines are discovered or
/// constructed — only on the template grammar wrapping them — so the
/// embedding application supplies this.
pub trait EngineRegistry {
    /// Builds an [`InnerEngine`] for `inner_name`, along with the concrete
    /// driver name it should be published under (see [`compose_name`]).
    /// Returns `None` if `inner_name` is not a known primitive.
    fn build(&self, inner_name: &str) -> Option<(Arc<dyn InnerEngine>, String)>;
}

/// Parses `spec`, resolves its inner primitive through `registry`, and
/// returns the constructed transform together with the name it should be
/// published under.
pub fn instantiate(
    spec: &str,
    registry: &dyn EngineRegistry,
    rng: impl rand_core::CryptoRngCore + Send + 'static,
) -> Result<(PaddedTransform, String)> {
    let template = parse_template(spec)?;
    let (engine, driver_name) = registry.build(template.inner_name).ok_or(Error::Invalid)?;
    let name = compose_name(&driver_name, template.hash_name)?;
    let transform = PaddedTransform::new(engine, template.hash_name, rng)?;
    Ok((transform, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::XorEngine;

    struct DeterministicRng(u8);

    impl rand_core::RngCore for DeterministicRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0 = self.0.wrapping_add(1);
            self.0 as u64
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest.iter_mut() {
                self.0 = self.0.wrapping_add(1);
                *b = self.0;
            }
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }
    impl rand_core::CryptoRng for DeterministicRng {}

    struct OneShotRegistry;
    impl EngineRegistry for OneShotRegistry {
        fn build(&self, inner_name: &str) -> Option<(Arc<dyn InnerEngine>, String)> {
            if inner_name == "rsa" {
                Some((Arc::new(XorEngine::new(128, 0x42)), "rsa-generic".to_string()))
            } else {
                None
            }
        }
    }

    #[test]
    fn parses_bare_inner_name() {
        let t = parse_template("pkcs1pad(rsa)").unwrap();
        assert_eq!(t.inner_name, "rsa");
        assert_eq!(t.hash_name, None);
    }

    #[test]
    fn parses_inner_and_hash() {
        let t = parse_template("pkcs1pad(rsa,sha256)").unwrap();
        assert_eq!(t.inner_name, "rsa");
        assert_eq!(t.hash_name, Some("sha256"));
    }

    #[test]
    fn rejects_missing_parens() {
        assert_eq!(parse_template("rsa").unwrap_err(), Error::Invalid);
        assert_eq!(parse_template("pkcs1pad(rsa").unwrap_err(), Error::Invalid);
    }

    #[test]
    fn rejects_empty_inner_name() {
        assert_eq!(parse_template("pkcs1pad()").unwrap_err(), Error::Invalid);
        assert_eq!(parse_template("pkcs1pad(,sha256)").unwrap_err(), Error::Invalid);
    }

    #[test]
    fn rejects_oversized_spec() {
        let spec = format!("pkcs1pad({})", "a".repeat(MAX_ALG_NAME));
        assert_eq!(parse_template(&spec).unwrap_err(), Error::Invalid);
    }

    #[test]
    fn compose_name_rejects_oversized_result() {
        let long_driver = "d".repeat(MAX_ALG_NAME);
        assert_eq!(compose_name(&long_driver, Some("sha256")).unwrap_err(), Error::Invalid);
    }

    #[test]
    fn instantiate_resolves_through_registry() {
        let (transform, name) =
            instantiate("pkcs1pad(rsa,sha256)", &OneShotRegistry, DeterministicRng(1)).unwrap();
        assert_eq!(name, "pkcs1pad(rsa-generic,sha256)");
        assert_eq!(transform.max_size().unwrap(), 128);
    }

    #[test]
    fn instantiate_rejects_unknown_inner() {
        assert_eq!(
            instantiate("pkcs1pad(ecdsa)", &OneShotRegistry, DeterministicRng(1)).unwrap_err(),
            Error::Invalid
        );
    }
}
