//! Validation policies for EtcdCluster admission webhooks.
//!
//! Policies are organized into tiers:
//! - Tier 1 (Critical): Always enforced (replica count, storage format)
//! - Tier 2 (Update): Only on UPDATE operations, warnings only (storage changes)
//!
//! Every spec resolves to exactly one outcome: admitted (possibly with
//! warnings) or denied with a reason. A denial short-circuits the checklist.

pub mod replicas;
pub mod storage;
pub mod storage_update;

use crate::crd::EtcdCluster;

/// Result of a validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub allowed: bool,
    /// Reason for denial (if not allowed)
    pub reason: Option<String>,
    /// Detailed message (if not allowed)
    pub message: Option<String>,
    /// Non-blocking concerns surfaced to the client
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create an allowed result
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
            message: None,
            warnings: Vec::new(),
        }
    }

    /// Create a denied result
    pub fn denied(reason: &str, message: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.to_string()),
            message: Some(message.to_string()),
            warnings: Vec::new(),
        }
    }

    /// Attach a warning to this result
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Fold another policy's result into this one.
    ///
    /// A denial replaces the accumulated result; warnings from allowed
    /// results are kept in order.
    fn merge(mut self, other: ValidationResult) -> Self {
        if !other.allowed {
            return other;
        }
        self.warnings.extend(other.warnings);
        self
    }
}

/// Context for validation
pub struct ValidationContext<'a> {
    /// The resource being validated
    pub resource: &'a EtcdCluster,
    /// The old resource (for UPDATE operations)
    pub old_resource: Option<&'a EtcdCluster>,
}

impl<'a> ValidationContext<'a> {
    /// Context for a CREATE of `resource`
    pub fn create(resource: &'a EtcdCluster) -> Self {
        Self {
            resource,
            old_resource: None,
        }
    }

    /// Context for an UPDATE from `old` to `resource`
    pub fn update(old: &'a EtcdCluster, resource: &'a EtcdCluster) -> Self {
        Self {
            resource,
            old_resource: Some(old),
        }
    }

    /// Check if this is an UPDATE operation
    pub fn is_update(&self) -> bool {
        self.old_resource.is_some()
    }
}

/// Run all validation policies
pub fn validate_all(ctx: &ValidationContext<'_>) -> ValidationResult {
    // Tier 1: Critical validations (always enforced)
    let result = ValidationResult::allowed().merge(replicas::validate(ctx));
    if !result.allowed {
        return result;
    }

    let result = result.merge(storage::validate(ctx));
    if !result.allowed {
        return result;
    }

    // Tier 2: Update validations (only for UPDATE operations)
    if ctx.is_update() {
        return result.merge(storage_update::validate(ctx));
    }

    result
}

/// Validate a newly created EtcdCluster
pub fn validate_create(resource: &EtcdCluster) -> ValidationResult {
    validate_all(&ValidationContext::create(resource))
}

/// Validate an update of an EtcdCluster from `old` to `new`
pub fn validate_update(old: &EtcdCluster, new: &EtcdCluster) -> ValidationResult {
    validate_all(&ValidationContext::update(old, new))
}

/// Validate the deletion of an EtcdCluster. Deletion is always admitted.
pub fn validate_delete(_resource: &EtcdCluster) -> ValidationResult {
    ValidationResult::allowed()
}
