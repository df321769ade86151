//! etcd-operator library crate
//!
//! Admission-time handling of `EtcdCluster` resources: the CRD definition,
//! defaulting and validation webhooks, and the resource names the webhooks
//! and the reconciler must agree on.

pub mod config;
pub mod crd;
pub mod health;
pub mod quantity;
pub mod resources;
pub mod webhooks;

pub use config::Config;
pub use health::HealthState;
pub use resources::{cluster_state_config_map_name, cluster_state_name};
pub use webhooks::{WebhookError, run_webhook_server};
