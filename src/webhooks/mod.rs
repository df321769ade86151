//! Webhook module for EtcdCluster admission requests.
//!
//! This module provides a MutatingAdmissionWebhook that fills unset fields
//! and a ValidatingAdmissionWebhook with tiered validation policies:
//! - Tier 1 (Critical): Always enforced (replica and storage validation)
//! - Tier 2 (Update): Only on UPDATE operations (storage change warnings)
//!
//! Defaulting and validation are independent units; the API server runs the
//! mutating hook before the validating one.

pub mod defaulting;
pub mod policies;
mod server;

pub use defaulting::{DefaultedField, default_cluster_spec};
pub use policies::{
    ValidationContext, ValidationResult, validate_all, validate_create, validate_delete,
    validate_update,
};
pub use server::{
    MUTATE_PATH, VALIDATE_PATH, WebhookError, WebhookState, create_webhook_router,
    defaulting_patch, run_webhook_server,
};

// Re-export kube-rs admission types for contract testing
pub use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
