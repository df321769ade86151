// Test code is allowed to panic on failure
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

//! Unit tests for etcd-operator.
//!
//! These tests run without a Kubernetes cluster and exercise the admission
//! pipeline (defaulting, then validation) and resource naming end to end.

#[path = "../common/mod.rs"]
mod common;

mod defaulting_tests {
    use super::common::fixtures::{EtcdClusterBuilder, empty_cluster};
    use etcd_operator::webhooks::{DefaultedField, default_cluster_spec};
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

    #[test]
    fn test_fills_default_size_and_leaves_replicas_unset() {
        let cluster = empty_cluster("etcd").with_defaults();
        assert_eq!(
            cluster.spec.replicas, None,
            "User should have an opportunity to create cluster with 0 replicas"
        );
        assert_eq!(cluster.spec.storage.size, Quantity("4Gi".to_string()));
    }

    #[test]
    fn test_does_not_override_supplied_values() {
        let cluster = EtcdClusterBuilder::new("etcd")
            .replicas(5)
            .storage_class("local-path")
            .storage_size("10Gi")
            .build()
            .with_defaults();
        assert_eq!(cluster.spec.replicas, Some(5));
        assert_eq!(cluster.spec.storage.size, Quantity("10Gi".to_string()));
        assert_eq!(
            cluster.spec.storage.storage_class.as_deref(),
            Some("local-path")
        );
    }

    #[test]
    fn test_reports_defaulted_fields() {
        let mut cluster = empty_cluster("etcd");
        assert_eq!(
            default_cluster_spec(&mut cluster.spec),
            vec![DefaultedField::StorageSize]
        );
        assert!(default_cluster_spec(&mut cluster.spec).is_empty());
    }
}

mod validation_tests {
    use super::common::fixtures::EtcdClusterBuilder;
    use etcd_operator::webhooks::{validate_create, validate_update};

    #[test]
    fn test_admits_when_required_fields_provided() {
        let cluster = EtcdClusterBuilder::new("etcd").replicas(1).build();
        let result = validate_create(&cluster);
        assert!(result.allowed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_admits_zero_replicas() {
        let cluster = EtcdClusterBuilder::new("etcd").replicas(0).build().with_defaults();
        assert!(validate_create(&cluster).allowed);
    }

    #[test]
    fn test_rejection_names_offending_field() {
        let cluster = EtcdClusterBuilder::new("etcd")
            .replicas(3)
            .storage_size("4 gigs")
            .build();
        let result = validate_create(&cluster);
        assert!(!result.allowed);
        assert!(result.message.unwrap().contains("spec.storage.size"));
    }

    #[test]
    fn test_update_storage_class_change_is_warning_only() {
        let old = EtcdClusterBuilder::new("etcd")
            .replicas(3)
            .storage_size("4Gi")
            .build();
        let new = EtcdClusterBuilder::new("etcd")
            .replicas(3)
            .storage_class("fast-ssd")
            .storage_size("4Gi")
            .build();
        let result = validate_update(&old, &new);
        assert!(result.allowed);
        assert_eq!(result.warnings.len(), 1);
    }
}

mod scenario_tests {
    use super::common::fixtures::{EtcdClusterBuilder, empty_cluster};
    use etcd_operator::cluster_state_config_map_name;
    use etcd_operator::webhooks::validate_create;

    #[test]
    fn test_scenario_empty_spec() {
        let cluster = empty_cluster("etcd").with_defaults();
        assert_eq!(cluster.spec.replicas, None);
        assert_eq!(cluster.spec.storage.size.0, "4Gi");

        let result = validate_create(&cluster);
        assert!(result.allowed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scenario_complete_spec_unchanged() {
        let cluster = EtcdClusterBuilder::new("etcd")
            .replicas(5)
            .storage_class("local-path")
            .storage_size("10Gi")
            .build();
        let defaulted = cluster.clone().with_defaults();
        assert_eq!(defaulted, cluster);
        assert!(validate_create(&defaulted).allowed);
    }

    #[test]
    fn test_scenario_single_replica() {
        let cluster = EtcdClusterBuilder::new("etcd").replicas(1).build().with_defaults();
        let result = validate_create(&cluster);
        assert!(result.allowed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scenario_state_record_name() {
        let cluster = EtcdClusterBuilder::new("etcd-prod")
            .namespace("prod")
            .build();
        assert_eq!(
            cluster_state_config_map_name(&cluster),
            "etcd-prod-cluster-state"
        );
    }
}

mod crd_tests {
    use etcd_operator::crd::EtcdCluster;
    use kube::CustomResourceExt;

    #[test]
    fn test_crd_metadata() {
        let crd = EtcdCluster::crd();
        assert_eq!(crd.spec.group, "etcd.aenix.io");
        assert_eq!(crd.spec.names.kind, "EtcdCluster");
        assert_eq!(crd.spec.names.plural, "etcdclusters");
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.versions[0].name, "v1alpha1");
    }

    #[test]
    fn test_crd_schema_has_storage() {
        let crd = EtcdCluster::crd();
        let yaml = serde_yaml::to_string(&crd).unwrap();
        assert!(yaml.contains("storageClass"));
        assert!(yaml.contains("replicas"));
    }

    #[test]
    fn test_cluster_deserializes_from_manifest() {
        let manifest = r#"
apiVersion: etcd.aenix.io/v1alpha1
kind: EtcdCluster
metadata:
  name: etcd-prod
  namespace: default
spec:
  replicas: 3
  storage:
    storageClass: local-path
    size: 10Gi
"#;
        let cluster: EtcdCluster = serde_yaml::from_str(manifest).unwrap();
        assert_eq!(cluster.spec.replicas, Some(3));
        assert_eq!(cluster.spec.storage.size.0, "10Gi");
        assert!(cluster.status.is_none());
    }

    #[test]
    fn test_cluster_status_from_manifest() {
        let manifest = r#"
apiVersion: etcd.aenix.io/v1alpha1
kind: EtcdCluster
metadata:
  name: etcd-prod
spec:
  replicas: 3
status:
  conditions:
    - type: Ready
      status: "True"
      reason: ClusterReady
      message: All members ready
      lastTransitionTime: "2024-05-01T10:00:00Z"
      observedGeneration: 1
"#;
        let cluster: EtcdCluster = serde_yaml::from_str(manifest).unwrap();
        let status = cluster.status.unwrap();
        assert_eq!(status.conditions[0].r#type, "Ready");
        assert_eq!(status.conditions[0].observed_generation, Some(1));
    }
}

mod config_tests {
    use etcd_operator::Config;

    #[test]
    fn test_default_ports() {
        let config = Config::default();
        assert_eq!(config.webhook_port, 9443);
        assert_eq!(config.health_port, 8080);
    }
}
