//! Storage validation policy.
//!
//! Tier 1 (Critical): Always enforced
//!
//! Validates:
//! - `storage.size` parses as a quantity and is not negative
//! - `storage.storageClass`, when present, is not an empty string
//!
//! An empty or zero size passes: the mutating webhook fills it before the
//! object is persisted.

use super::{ValidationContext, ValidationResult};
use crate::quantity::{parse_quantity, quantity_is_zero};

/// Validate the storage section
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let storage = &ctx.resource.spec.storage;

    if !quantity_is_zero(&storage.size) {
        match parse_quantity(&storage.size.0) {
            Ok(size) if size.is_negative() => {
                return ValidationResult::denied(
                    "InvalidStorageSize",
                    &format!(
                        "spec.storage.size cannot be negative (got {})",
                        storage.size.0
                    ),
                );
            }
            Ok(_) => {}
            Err(e) => {
                return ValidationResult::denied(
                    "InvalidStorageSize",
                    &format!(
                        "spec.storage.size must be a quantity such as 4Gi: {}",
                        e
                    ),
                );
            }
        }
    }

    if storage
        .storage_class
        .as_deref()
        .is_some_and(|class| class.trim().is_empty())
    {
        return ValidationResult::denied(
            "InvalidStorageClass",
            "spec.storage.storageClass cannot be empty; omit it to use the cluster default",
        );
    }

    ValidationResult::allowed()
}
