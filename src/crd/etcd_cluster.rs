//! EtcdCluster Custom Resource Definition.
//!
//! Declares the desired shape of an etcd cluster. Only the fields the
//! admission webhooks and the reconciler agree on live here: the member
//! count and the storage each member receives.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Storage size assigned to each member when the user leaves it unset.
pub const DEFAULT_STORAGE_SIZE: &str = "4Gi";

/// EtcdCluster is a custom resource describing an etcd cluster.
///
/// Example:
/// ```yaml
/// apiVersion: etcd.aenix.io/v1alpha1
/// kind: EtcdCluster
/// metadata:
///   name: etcd-prod
/// spec:
///   replicas: 3
///   storage:
///     storageClass: local-path
///     size: 10Gi
/// ```
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "etcd.aenix.io",
    version = "v1alpha1",
    kind = "EtcdCluster",
    plural = "etcdclusters",
    shortname = "etcd",
    status = "EtcdClusterStatus",
    namespaced,
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"Replicas", "type":"integer", "jsonPath":".spec.replicas"}"#,
    printcolumn = r#"{"name":"Size", "type":"string", "jsonPath":".spec.storage.size"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct EtcdClusterSpec {
    /// Number of etcd members.
    ///
    /// Absent means "no opinion" and is left for the platform to decide.
    /// It is never defaulted, and it is not the same as an explicit 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Storage provisioned for every member.
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage: StorageSpec,
}

/// Per-member storage configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    /// Storage class name for PersistentVolumeClaims.
    /// If not set, uses cluster default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Size of each member's volume (default: 4Gi).
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: Quantity,
}

/// Read an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Status of an EtcdCluster.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EtcdClusterStatus {
    /// Conditions describing the current state.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Condition describes the state of a cluster at a certain point.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition ("Initialized" or "Ready").
    pub r#type: String,
    /// Status of the condition ("True", "False", "Unknown").
    pub status: String,
    /// Machine-readable reason for the condition's last transition.
    pub reason: String,
    /// Human-readable message indicating details about last transition.
    pub message: String,
    /// Last time the condition transitioned from one status to another (RFC 3339).
    pub last_transition_time: String,
    /// The generation of the resource this condition was observed for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}
