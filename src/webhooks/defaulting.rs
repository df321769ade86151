//! Defaulting for EtcdCluster admission.
//!
//! Fills fields the user left unset with safe values. A field the user
//! supplied is never overwritten, so running defaulting twice gives the
//! same object as running it once.
//!
//! `replicas` is deliberately left alone: an absent count means "let the
//! platform decide", which is not the same as asking for zero members.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use serde_json::Value;

use crate::crd::{DEFAULT_STORAGE_SIZE, EtcdCluster, EtcdClusterSpec};
use crate::quantity::quantity_is_zero;

/// A field filled in by defaulting
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DefaultedField {
    /// `spec.storage.size` was empty or zero
    StorageSize,
}

impl DefaultedField {
    /// JSON path segments of the field within the object
    pub fn path(&self) -> &'static [&'static str] {
        match self {
            DefaultedField::StorageSize => &["spec", "storage", "size"],
        }
    }

    /// Current value of the field in `spec`, as JSON
    pub fn value(&self, spec: &EtcdClusterSpec) -> Value {
        match self {
            DefaultedField::StorageSize => Value::String(spec.storage.size.0.clone()),
        }
    }
}

impl std::fmt::Display for DefaultedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultedField::StorageSize => write!(f, "spec.storage.size"),
        }
    }
}

/// Fill unset fields of `spec` in place.
///
/// Returns the fields that were filled, empty when the spec was already
/// complete. Never fails.
pub fn default_cluster_spec(spec: &mut EtcdClusterSpec) -> Vec<DefaultedField> {
    let mut defaulted = Vec::new();

    if quantity_is_zero(&spec.storage.size) {
        spec.storage.size = Quantity(DEFAULT_STORAGE_SIZE.to_string());
        defaulted.push(DefaultedField::StorageSize);
    }

    defaulted
}

impl EtcdCluster {
    /// Return this cluster with unset spec fields defaulted
    pub fn with_defaults(mut self) -> Self {
        default_cluster_spec(&mut self.spec);
        self
    }
}

/// Write the defaulted fields of `spec` into a raw object.
///
/// Missing intermediate objects are created; values that are not objects on
/// the way to a field are replaced by one.
pub fn apply_to_raw(object: &mut Value, spec: &EtcdClusterSpec, fields: &[DefaultedField]) {
    for field in fields {
        set_path(object, field.path(), field.value(spec));
    }
}

fn set_path(target: &mut Value, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        *target = value;
        return;
    };

    let mut current = target;
    for segment in parents {
        if !current.is_object() {
            *current = Value::Object(serde_json::Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new())),
            _ => return,
        };
    }

    if !current.is_object() {
        *current = Value::Object(serde_json::Map::new());
    }
    if let Value::Object(map) = current {
        map.insert(last.to_string(), value);
    }
}
