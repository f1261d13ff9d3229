//! Generic partial-update support.
//!
//! A patch carries `Some(..)` for every field the caller wants to overwrite
//! and `None` for fields to keep. Nullable fields use `Option<Option<T>>` so
//! a patch can clear them explicitly.

/// Partial update applicable to a record of type `T`.
pub trait Patch<T> {
    /// Merges provided fields into `target`, leaving the rest untouched.
    fn apply_to(self, target: &mut T);

    /// Returns whether applying this patch would change nothing.
    fn is_empty(&self) -> bool;
}

/// Applies `patch` to `target`.
pub fn apply_patch<T, P: Patch<T>>(target: &mut T, patch: P) {
    patch.apply_to(target);
}

pub(crate) fn merge_field<V>(slot: &mut V, value: Option<V>) {
    if let Some(value) = value {
        *slot = value;
    }
}
