use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// In-process configuration state, partitioned by namespace.
///
/// Reads are read-through: a lookup observes every merge applied so far,
/// in module-processing order. Access is single-threaded by construction
/// during boot, so no synchronization is carried here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigStore {
    namespaces: HashMap<String, Map<String, Value>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single key under a namespace.
    pub fn get(&self, namespace: &str, key: &str) -> Option<&Value> {
        self.namespaces.get(namespace).and_then(|ns| ns.get(key))
    }

    /// Set a single key under a namespace, creating the namespace if it
    /// does not exist yet.
    pub fn set(&mut self, namespace: &str, key: &str, value: Value) {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// The whole body of one namespace, if anything was written to it.
    pub fn namespace(&self, namespace: &str) -> Option<&Map<String, Value>> {
        self.namespaces.get(namespace)
    }

    /// Replace the whole body of a namespace entry.
    pub fn set_namespace(&mut self, namespace: &str, body: Map<String, Value>) {
        self.namespaces.insert(namespace.to_string(), body);
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Clear all configuration state. Exists for the test harness.
    pub fn reset(&mut self) {
        self.namespaces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let mut store = ConfigStore::new();
        store.set("mail", "from", json!("noreply@example.com"));

        assert_eq!(
            store.get("mail", "from"),
            Some(&json!("noreply@example.com"))
        );
        assert!(store.get("mail", "to").is_none());
        assert!(store.get("queue", "from").is_none());
    }

    #[test]
    fn test_read_through_sees_latest_write() {
        let mut store = ConfigStore::new();
        store.set("mail", "from", json!("a@example.com"));
        store.set("mail", "from", json!("b@example.com"));
        assert_eq!(store.get("mail", "from"), Some(&json!("b@example.com")));
    }

    #[test]
    fn test_namespace_body() {
        let mut store = ConfigStore::new();
        assert!(store.namespace("modules").is_none());

        store.set("modules", "billing", json!({ "name": "Billing" }));
        let ns = store.namespace("modules").unwrap();
        assert_eq!(ns.len(), 1);
        assert_eq!(ns.get("billing"), Some(&json!({ "name": "Billing" })));
    }

    #[test]
    fn test_reset() {
        let mut store = ConfigStore::new();
        store.set("mail", "from", json!("x"));
        assert!(!store.is_empty());

        store.reset();
        assert!(store.is_empty());
        assert!(store.get("mail", "from").is_none());
    }
}
