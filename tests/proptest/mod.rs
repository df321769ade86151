// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Property-based tests for etcd-operator.
//!
//! Uses proptest to generate random cluster specs and verify the admission
//! invariants hold for every one of them.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use proptest::prelude::*;

use etcd_operator::cluster_state_name;
use etcd_operator::crd::{EtcdCluster, EtcdClusterSpec, StorageSpec};
use etcd_operator::quantity::quantity_is_zero;
use etcd_operator::webhooks::{default_cluster_spec, validate_create, validate_update};

/// Strategy for generating replica counts, including absent and negative.
fn any_replicas() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![Just(None), (-5..=9i32).prop_map(Some)]
}

/// Strategy for generating well-formed non-zero quantities.
fn valid_size() -> impl Strategy<Value = String> {
    (
        1..=512u32,
        prop_oneof![Just(""), Just("Ki"), Just("Mi"), Just("Gi"), Just("Ti"), Just("G")],
    )
        .prop_map(|(amount, unit)| format!("{amount}{unit}"))
}

/// Strategy for generating any size string: unset, zero, valid or garbage.
fn any_size() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("0".to_string()),
        Just("0Gi".to_string()),
        Just("0e400".to_string()),
        Just("1e-400".to_string()),
        Just("1e400".to_string()),
        valid_size(),
        "[a-z ]{1,8}",
    ]
}

/// Strategy for generating storage classes, including absent.
fn any_storage_class() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[a-z][a-z-]{0,15}".prop_map(Some)]
}

fn any_spec() -> impl Strategy<Value = EtcdClusterSpec> {
    (any_replicas(), any_storage_class(), any_size()).prop_map(|(replicas, class, size)| {
        EtcdClusterSpec {
            replicas,
            storage: StorageSpec {
                storage_class: class,
                size: Quantity(size),
            },
        }
    })
}

fn defaulted(spec: &EtcdClusterSpec) -> EtcdClusterSpec {
    let mut spec = spec.clone();
    default_cluster_spec(&mut spec);
    spec
}

proptest! {
    /// Property: Defaulting twice equals defaulting once.
    #[test]
    fn test_defaulting_idempotent(spec in any_spec()) {
        let once = defaulted(&spec);
        let twice = defaulted(&once);
        prop_assert_eq!(once, twice);
    }

    /// Property: A non-zero size is never changed by defaulting.
    #[test]
    fn test_non_zero_size_preserved(spec in any_spec()) {
        prop_assume!(!quantity_is_zero(&spec.storage.size));
        prop_assert_eq!(defaulted(&spec).storage.size, spec.storage.size);
    }

    /// Property: An unset size becomes 4Gi.
    #[test]
    fn test_unset_size_defaulted(replicas in any_replicas(), class in any_storage_class()) {
        let spec = EtcdClusterSpec {
            replicas,
            storage: StorageSpec { storage_class: class, size: Quantity::default() },
        };
        prop_assert_eq!(defaulted(&spec).storage.size, Quantity("4Gi".to_string()));
    }

    /// Property: After defaulting, the size is never zero.
    #[test]
    fn test_size_non_zero_after_defaulting(spec in any_spec()) {
        prop_assert!(!quantity_is_zero(&defaulted(&spec).storage.size));
    }

    /// Property: Replicas and storage class pass through defaulting unchanged.
    #[test]
    fn test_replicas_and_class_preserved(spec in any_spec()) {
        let result = defaulted(&spec);
        prop_assert_eq!(result.replicas, spec.replicas);
        prop_assert_eq!(result.storage.storage_class, spec.storage.storage_class);
    }

    /// Property: Validation yields exactly one outcome, and only denials carry a reason.
    #[test]
    fn test_admission_total(spec in any_spec()) {
        let cluster = EtcdCluster::new("etcd", defaulted(&spec));
        let result = validate_create(&cluster);
        prop_assert_eq!(result.allowed, result.reason.is_none());
        prop_assert_eq!(result.allowed, result.message.is_none());
        if !result.allowed {
            prop_assert!(result.warnings.is_empty());
        }
    }

    /// Property: Well-formed defaulted specs with non-negative replicas are admitted.
    #[test]
    fn test_well_formed_specs_admitted(
        replicas in prop_oneof![Just(None), (0..=9i32).prop_map(Some)],
        class in any_storage_class(),
        size in prop_oneof![Just(String::new()), valid_size()],
    ) {
        let spec = EtcdClusterSpec {
            replicas,
            storage: StorageSpec { storage_class: class, size: Quantity(size) },
        };
        let result = validate_create(&EtcdCluster::new("etcd", defaulted(&spec)));
        prop_assert!(result.allowed, "denied: {:?}", result.message);
        prop_assert!(result.warnings.is_empty());
    }

    /// Property: Updates with unchanged specs produce no warnings.
    #[test]
    fn test_noop_update_has_no_warnings(spec in any_spec()) {
        let cluster = EtcdCluster::new("etcd", defaulted(&spec));
        let result = validate_update(&cluster, &cluster);
        prop_assert!(result.warnings.is_empty());
    }

    /// Property: The state record name is the cluster name plus a fixed suffix.
    #[test]
    fn test_state_name_formula(name in "[a-z][a-z0-9-]{0,40}") {
        let derived = cluster_state_name(&name);
        prop_assert_eq!(derived.clone(), format!("{name}-cluster-state"));
        prop_assert_eq!(derived, cluster_state_name(&name));
    }
}
