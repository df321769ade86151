//! Storage change policy.
//!
//! Tier 2 (Update): Only enforced on UPDATE operations
//!
//! Never denies. Warns when a storage change will not reach the volumes of
//! members that already exist:
//! - `storage.size` decreased
//! - `storage.storageClass` changed

use super::{ValidationContext, ValidationResult};
use crate::quantity::parse_quantity;

/// Warn about storage changes on UPDATE operations
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let old = match ctx.old_resource {
        Some(r) => r,
        None => return ValidationResult::allowed(), // Not an UPDATE
    };

    let old_storage = &old.spec.storage;
    let new_storage = &ctx.resource.spec.storage;
    let mut result = ValidationResult::allowed();

    if let (Ok(old_size), Ok(new_size)) = (
        parse_quantity(&old_storage.size.0),
        parse_quantity(&new_storage.size.0),
    ) && new_size < old_size
    {
        result = result.with_warning(format!(
            "spec.storage.size decreased from {} to {}; existing member volumes are not shrunk",
            old_storage.size.0, new_storage.size.0
        ));
    }

    if old_storage.storage_class != new_storage.storage_class {
        result = result.with_warning(format!(
            "spec.storage.storageClass changed from {} to {}; only newly created members use it",
            old_storage.storage_class.as_deref().unwrap_or("<default>"),
            new_storage.storage_class.as_deref().unwrap_or("<default>")
        ));
    }

    result
}
