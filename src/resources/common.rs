//! Common resource naming utilities.

use kube::ResourceExt;

use crate::crd::EtcdCluster;

/// Suffix of the ConfigMap holding bootstrap state shared by members
pub const CLUSTER_STATE_SUFFIX: &str = "-cluster-state";

/// Name of the coordination ConfigMap for a cluster called `cluster_name`.
///
/// Plain concatenation: a cluster named `a-cluster-state` and a cluster named
/// `a` produce `a-cluster-state-cluster-state` and `a-cluster-state`, so names
/// that already end in the suffix can collide with other clusters' records.
pub fn cluster_state_name(cluster_name: &str) -> String {
    format!("{cluster_name}{CLUSTER_STATE_SUFFIX}")
}

/// Name of the coordination ConfigMap for an EtcdCluster
pub fn cluster_state_config_map_name(cluster: &EtcdCluster) -> String {
    cluster_state_name(&cluster.name_any())
}
