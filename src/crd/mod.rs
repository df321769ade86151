//! Custom Resource Definitions (CRDs) for etcd-operator.
//!
//! - `EtcdCluster`: Declare the desired shape of an etcd cluster

mod etcd_cluster;

pub use etcd_cluster::*;
