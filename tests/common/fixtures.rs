//! Test fixtures and builder patterns for EtcdCluster.

use etcd_operator::crd::{EtcdCluster, EtcdClusterSpec, StorageSpec};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Builder for creating EtcdCluster test fixtures.
///
/// # Example
/// ```
/// let cluster = EtcdClusterBuilder::new("etcd-prod")
///     .namespace("test-ns")
///     .replicas(3)
///     .storage_size("10Gi")
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct EtcdClusterBuilder {
    name: String,
    namespace: Option<String>,
    replicas: Option<i32>,
    storage_class: Option<String>,
    storage_size: Option<String>,
    generation: Option<i64>,
}

impl EtcdClusterBuilder {
    /// Create a new builder with the given cluster name and an empty spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            replicas: None,
            storage_class: None,
            storage_size: None,
            generation: None,
        }
    }

    /// Set the namespace for the cluster.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the number of members.
    pub fn replicas(mut self, replicas: i32) -> Self {
        self.replicas = Some(replicas);
        self
    }

    /// Set the storage class.
    pub fn storage_class(mut self, storage_class: impl Into<String>) -> Self {
        self.storage_class = Some(storage_class.into());
        self
    }

    /// Set the storage size quantity.
    pub fn storage_size(mut self, size: impl Into<String>) -> Self {
        self.storage_size = Some(size.into());
        self
    }

    /// Set the generation.
    pub fn generation(mut self, generation: i64) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Build the EtcdCluster.
    pub fn build(self) -> EtcdCluster {
        EtcdCluster {
            metadata: ObjectMeta {
                name: Some(self.name),
                namespace: self.namespace,
                generation: self.generation,
                ..Default::default()
            },
            spec: EtcdClusterSpec {
                replicas: self.replicas,
                storage: StorageSpec {
                    storage_class: self.storage_class,
                    size: Quantity(self.storage_size.unwrap_or_default()),
                },
            },
            status: None,
        }
    }
}

impl Default for EtcdClusterBuilder {
    fn default() -> Self {
        Self::new("test-cluster")
    }
}

/// Create an EtcdCluster with an empty spec.
pub fn empty_cluster(name: &str) -> EtcdCluster {
    EtcdClusterBuilder::new(name).build()
}

