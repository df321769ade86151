//! Print the EtcdCluster CustomResourceDefinition as YAML.
//!
//! Usage: `cargo run --bin crdgen > config/crd/etcdcluster.yaml`

use etcd_operator::crd::EtcdCluster;
use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&EtcdCluster::crd())?);
    Ok(())
}
