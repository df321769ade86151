//! Member count validation policy.
//!
//! Tier 1 (Critical): Always enforced
//!
//! Validates:
//! - Replica count is not negative
//!
//! An absent count and an explicit 0 are both admitted: users must be able
//! to create a cluster with no members and scale it later.

use super::{ValidationContext, ValidationResult};

/// Validate the member count
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    match ctx.resource.spec.replicas {
        Some(replicas) if replicas < 0 => ValidationResult::denied(
            "InvalidReplicas",
            &format!("spec.replicas cannot be negative (got {})", replicas),
        ),
        _ => ValidationResult::allowed(),
    }
}
