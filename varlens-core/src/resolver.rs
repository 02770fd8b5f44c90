//! The HGVS projection used by search and by the annotation cache.

use crate::models::Variant;

///
/// Resolves the HGVS names a variant should be known by. The raw record
/// field is the fallback; an annotation cache can substitute the
/// alternatives it has fetched.
///
pub trait HgvsResolver {
    fn resolve_hgvs(&self, variant: &Variant) -> Vec<String>;
}

/// Resolver that only ever reports the record's own `hgvs` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawHgvs;

impl HgvsResolver for RawHgvs {
    fn resolve_hgvs(&self, variant: &Variant) -> Vec<String> {
        variant.raw_hgvs()
    }
}

impl<R: HgvsResolver + ?Sized> HgvsResolver for &R {
    fn resolve_hgvs(&self, variant: &Variant) -> Vec<String> {
        (**self).resolve_hgvs(variant)
    }
}
