//! Names of Kubernetes resources owned by an EtcdCluster.
//!
//! The reconciler addresses these resources by name; every caller goes
//! through the functions here rather than formatting names itself.

pub mod common;

pub use common::{cluster_state_config_map_name, cluster_state_name};
