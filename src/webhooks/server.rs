//! Admission webhook server.
//!
//! Provides HTTP endpoints for Kubernetes admission webhooks:
//! - `/mutate-etcd-aenix-io-v1alpha1-etcdcluster` fills unset EtcdCluster fields
//! - `/validate-etcd-aenix-io-v1alpha1-etcdcluster` admits or rejects EtcdClusters
//!
//! To enable webhooks:
//! 1. Deploy cert-manager for TLS certificates
//! 2. Create the MutatingWebhookConfiguration and ValidatingWebhookConfiguration
//! 3. Mount the TLS certificate secret to the operator pod at /etc/webhook/certs/
//!
//! The webhook server starts automatically when certificates are present.

use std::sync::Arc;
use std::time::Instant;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use kube::Resource;
use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::crd::{EtcdCluster, EtcdClusterSpec};
use crate::health::HealthState;
use crate::webhooks::defaulting::{DefaultedField, apply_to_raw, default_cluster_spec};
use crate::webhooks::policies::{ValidationContext, ValidationResult, validate_all, validate_delete};

/// Path of the defaulting (mutating) webhook
pub const MUTATE_PATH: &str = "/mutate-etcd-aenix-io-v1alpha1-etcdcluster";
/// Path of the validating webhook
pub const VALIDATE_PATH: &str = "/validate-etcd-aenix-io-v1alpha1-etcdcluster";

/// Shared state for webhook handlers
pub struct WebhookState {
    pub health: Arc<HealthState>,
}

impl WebhookState {
    pub fn new(health: Arc<HealthState>) -> Self {
        Self { health }
    }

    fn record(&self, webhook: &str, operation: &Operation, decision: &str, started: Instant) {
        self.health.metrics.record_admission(
            webhook,
            operation_label(operation),
            decision,
            started.elapsed().as_secs_f64(),
        );
    }

    /// Record a review that carried no request to decide on
    fn record_invalid(&self, webhook: &str, started: Instant) {
        self.health.metrics.record_admission(
            webhook,
            "UNKNOWN",
            "invalid",
            started.elapsed().as_secs_f64(),
        );
    }
}

fn operation_label(operation: &Operation) -> &'static str {
    match operation {
        Operation::Create => "CREATE",
        Operation::Update => "UPDATE",
        Operation::Delete => "DELETE",
        Operation::Connect => "CONNECT",
    }
}

/// Create a denial response with reason embedded in message.
/// kube-rs deny() only sets status.message, so we format as "[reason] message"
fn deny_with_reason<T: Resource>(
    request: &AdmissionRequest<T>,
    message: &str,
    reason: &str,
) -> AdmissionReview<DynamicObject> {
    let full_message = format!("[{}] {}", reason, message);
    AdmissionResponse::from(request)
        .deny(full_message)
        .into_review()
}

/// Create the webhook router
pub fn create_webhook_router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route(MUTATE_PATH, post(mutate_etcdcluster))
        .route(VALIDATE_PATH, post(validate_etcdcluster))
        .with_state(state)
}

/// Compute the JSON patch that defaults a raw EtcdCluster object.
///
/// `object` is the object body without metadata, as carried by a
/// `DynamicObject`. Paths in the patch are rooted at the object, so they
/// apply unchanged to the full resource.
pub fn defaulting_patch(
    object: &Value,
) -> Result<(json_patch::Patch, Vec<DefaultedField>), serde_json::Error> {
    let mut spec: EtcdClusterSpec = match object.get("spec") {
        None | Some(Value::Null) => EtcdClusterSpec::default(),
        Some(spec) => serde_json::from_value(spec.clone())?,
    };

    let fields = default_cluster_spec(&mut spec);
    let mut mutated = object.clone();
    apply_to_raw(&mut mutated, &spec, &fields);

    Ok((json_patch::diff(object, &mutated), fields))
}

/// Defaulting admission webhook handler
async fn mutate_etcdcluster(
    State(state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> impl IntoResponse {
    let started = Instant::now();
    let request: AdmissionRequest<DynamicObject> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to extract admission request");
            state.record_invalid("mutate", started);
            return (
                StatusCode::BAD_REQUEST,
                Json(
                    AdmissionResponse::invalid(format!("Invalid AdmissionReview: {}", e))
                        .into_review(),
                ),
            );
        }
    };

    let uid = &request.uid;
    debug!(
        uid = %uid,
        operation = ?request.operation,
        namespace = ?request.namespace,
        name = ?request.name,
        dry_run = request.dry_run,
        "Processing defaulting request"
    );

    if request.operation == Operation::Delete {
        state.record("mutate", &request.operation, "allowed", started);
        return (
            StatusCode::OK,
            Json(AdmissionResponse::from(&request).into_review()),
        );
    }

    let object = match &request.object {
        Some(obj) => obj,
        None => {
            debug!(uid = %uid, "No object in request, allowing unchanged");
            state.record("mutate", &request.operation, "allowed", started);
            return (
                StatusCode::OK,
                Json(AdmissionResponse::from(&request).into_review()),
            );
        }
    };

    let (patch, fields) = match defaulting_patch(&object.data) {
        Ok(result) => result,
        Err(e) => {
            warn!(uid = %uid, error = %e, "EtcdCluster spec could not be read");
            state.record("mutate", &request.operation, "denied", started);
            return (
                StatusCode::OK,
                Json(deny_with_reason(
                    &request,
                    &format!("spec could not be read: {}", e),
                    "InvalidSpec",
                )),
            );
        }
    };

    if patch.0.is_empty() {
        debug!(uid = %uid, "Nothing to default");
        state.record("mutate", &request.operation, "allowed", started);
        return (
            StatusCode::OK,
            Json(AdmissionResponse::from(&request).into_review()),
        );
    }

    for field in &fields {
        state.health.metrics.record_defaulted_field(&field.to_string());
    }

    match AdmissionResponse::from(&request).with_patch(patch) {
        Ok(response) => {
            info!(
                uid = %uid,
                name = ?request.name,
                fields = ?fields.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "Defaulted EtcdCluster fields"
            );
            state.record("mutate", &request.operation, "patched", started);
            (StatusCode::OK, Json(response.into_review()))
        }
        Err(e) => {
            error!(uid = %uid, error = %e, "Failed to serialize patch");
            state.record("mutate", &request.operation, "denied", started);
            (
                StatusCode::OK,
                Json(deny_with_reason(
                    &request,
                    &format!("patch serialization error: {}", e),
                    "InternalError",
                )),
            )
        }
    }
}

/// Read a typed EtcdCluster out of an admission object
fn typed_cluster(object: &DynamicObject) -> Result<EtcdCluster, serde_json::Error> {
    serde_json::to_value(object).and_then(serde_json::from_value)
}

/// Validating admission webhook handler
async fn validate_etcdcluster(
    State(state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> impl IntoResponse {
    let started = Instant::now();
    let request: AdmissionRequest<DynamicObject> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to extract admission request");
            state.record_invalid("validate", started);
            return (
                StatusCode::BAD_REQUEST,
                Json(
                    AdmissionResponse::invalid(format!("Invalid AdmissionReview: {}", e))
                        .into_review(),
                ),
            );
        }
    };

    let uid = &request.uid;
    debug!(
        uid = %uid,
        operation = ?request.operation,
        namespace = ?request.namespace,
        name = ?request.name,
        dry_run = request.dry_run,
        "Processing admission request"
    );

    let result = if request.operation == Operation::Delete {
        request
            .old_object
            .as_ref()
            .and_then(|obj| typed_cluster(obj).ok())
            .map(|old| validate_delete(&old))
            .unwrap_or_else(ValidationResult::allowed)
    } else {
        let resource = match request.object.as_ref().map(typed_cluster) {
            Some(Ok(obj)) => obj,
            Some(Err(e)) => {
                warn!(uid = %uid, error = %e, "EtcdCluster could not be read");
                state.record("validate", &request.operation, "denied", started);
                return (
                    StatusCode::OK,
                    Json(deny_with_reason(
                        &request,
                        &format!("spec could not be read: {}", e),
                        "InvalidSpec",
                    )),
                );
            }
            None => {
                error!(uid = %uid, "Missing object in request");
                state.record("validate", &request.operation, "denied", started);
                return (
                    StatusCode::OK,
                    Json(deny_with_reason(
                        &request,
                        "Missing object in request",
                        "InvalidRequest",
                    )),
                );
            }
        };

        let old_resource = match request.old_object.as_ref().map(typed_cluster).transpose() {
            Ok(old) => old,
            Err(e) => {
                warn!(uid = %uid, error = %e, "Previous EtcdCluster could not be read");
                state.record("validate", &request.operation, "denied", started);
                return (
                    StatusCode::OK,
                    Json(deny_with_reason(
                        &request,
                        &format!("previous spec could not be read: {}", e),
                        "InvalidSpec",
                    )),
                );
            }
        };

        let ctx = ValidationContext {
            resource: &resource,
            old_resource: old_resource.as_ref(),
        };
        validate_all(&ctx)
    };

    if !result.allowed {
        let reason = result
            .reason
            .unwrap_or_else(|| "ValidationFailed".to_string());
        let message = result
            .message
            .unwrap_or_else(|| "Validation failed".to_string());
        warn!(uid = %uid, reason = %reason, message = %message, "Admission request denied");
        state.record("validate", &request.operation, "denied", started);
        return (
            StatusCode::OK,
            Json(deny_with_reason(&request, &message, &reason)),
        );
    }

    let mut response = AdmissionResponse::from(&request);
    if !result.warnings.is_empty() {
        info!(uid = %uid, warnings = ?result.warnings, "Admission request allowed with warnings");
        response.warnings = Some(result.warnings);
    } else {
        info!(uid = %uid, "Admission request allowed");
    }
    state.record("validate", &request.operation, "allowed", started);
    (StatusCode::OK, Json(response.into_review()))
}

/// Errors that can occur when running the webhook server
#[derive(Error, Debug)]
pub enum WebhookError {
    /// TLS configuration error
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    /// Server error
    #[error("Webhook server error: {0}")]
    Server(String),
}

/// Run the webhook server with TLS
///
/// Binds to 0.0.0.0 on the configured port and serves both admission
/// endpoints. Readiness is reported through `health` once TLS is loaded.
pub async fn run_webhook_server(
    health: Arc<HealthState>,
    config: &Config,
) -> Result<(), WebhookError> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;

    let state = Arc::new(WebhookState::new(health.clone()));
    let app = create_webhook_router(state);

    let tls = RustlsConfig::from_pem_file(&config.cert_path, &config.key_path)
        .await
        .map_err(|e| WebhookError::TlsConfig(e.to_string()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.webhook_port));
    info!(port = config.webhook_port, "Webhook server listening with TLS");
    health.set_ready(true).await;

    let served = axum_server::bind_rustls(addr, tls)
        .serve(app.into_make_service())
        .await
        .map_err(|e| WebhookError::Server(e.to_string()));

    health.set_ready(false).await;
    served
}
