pub mod merge;
pub mod store;

// Re-export key types for convenience.
pub use merge::{merge_module_config, ConfigError, MODULES_NAMESPACE, MODULE_FRAGMENT};
pub use store::ConfigStore;
