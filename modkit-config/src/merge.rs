use std::fs;
use std::path::{Path, PathBuf};

use modkit_module::{kebab_key, ModuleDescriptor};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::store::ConfigStore;

/// Namespace that holds one entry per registered module.
pub const MODULES_NAMESPACE: &str = "modules";

/// Reserved fragment base name whose content belongs to the module's own
/// namespace entry rather than a global namespace.
pub const MODULE_FRAGMENT: &str = "module";

/// Errors produced while merging a module's configuration fragments.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fragment {}: expected a JSON object at the top level", .0.display())]
    NotAnObject(PathBuf),
}

/// Merge one module's configuration fragments into the store.
///
/// An entry `modules.<kebab_key> = { "name": <display name> }` is always
/// written, config directory or not. When `<root>/module/config` exists,
/// each immediate `.json` child (directories skipped) is applied in file
/// name order:
///
/// - a fragment whose base name is the reserved `module` name merges into
///   the module's own namespace entry, fragment keys winning at the top
///   level;
/// - any other fragment contributes to the **global** namespace named by
///   its lowercased base name under the additive-list contract: the value
///   already present under `namespace.key` is wrapped into a list if it is
///   not one, and the fragment's value(s) are appended. Two modules
///   contributing to the same key accumulate rather than clobber, and
///   merging the same fragment twice accumulates twice.
///
/// A missing config directory is expected and silent.
pub fn merge_module_config(
    descriptor: &ModuleDescriptor,
    store: &mut ConfigStore,
) -> Result<(), ConfigError> {
    store.set(
        MODULES_NAMESPACE,
        &descriptor.kebab_key,
        json!({ "name": descriptor.name }),
    );

    let config_dir = descriptor.root_path.join("module").join("config");
    if !config_dir.is_dir() {
        debug!(module = %descriptor.name, "no config directory; name entry only");
        return Ok(());
    }

    for path in fragment_paths(&config_dir)? {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let fragment = read_fragment(&path)?;
        let base_name = kebab_key(stem);
        if base_name == MODULE_FRAGMENT {
            merge_private(descriptor, store, fragment);
        } else {
            merge_global(store, &base_name, fragment);
        }
        debug!(module = %descriptor.name, fragment = %base_name, "config fragment merged");
    }
    Ok(())
}

/// Immediate `.json` children of the config directory, in file name order
/// so that merging is deterministic across platforms.
fn fragment_paths(config_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(config_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_fragment(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let data = fs::read_to_string(path)?;
    match serde_json::from_str(&data)? {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject(path.to_path_buf())),
    }
}

/// The `module` fragment becomes the body of the module's own namespace
/// entry, deep-merged with the pre-set `name` key: fragment keys win at the
/// top level, `name` survives unless the fragment overrides it.
fn merge_private(descriptor: &ModuleDescriptor, store: &mut ConfigStore, fragment: Map<String, Value>) {
    let mut body = match store.get(MODULES_NAMESPACE, &descriptor.kebab_key) {
        Some(Value::Object(existing)) => existing.clone(),
        _ => Map::new(),
    };
    for (key, value) in fragment {
        body.insert(key, value);
    }
    store.set(MODULES_NAMESPACE, &descriptor.kebab_key, Value::Object(body));
}

/// Additive-list accumulation into a global namespace.
fn merge_global(store: &mut ConfigStore, namespace: &str, fragment: Map<String, Value>) {
    for (key, value) in fragment {
        let mut merged = match store.get(namespace, &key) {
            Some(Value::Array(items)) => items.clone(),
            Some(existing) => vec![existing.clone()],
            None => Vec::new(),
        };
        match value {
            Value::Array(items) => merged.extend(items),
            other => merged.push(other),
        }
        store.set(namespace, &key, Value::Array(merged));
    }
}
