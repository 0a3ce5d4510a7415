pub mod dependency;
pub mod descriptor;
pub mod registry;

// Re-export key types for convenience.
pub use dependency::{check_dependencies, short_module_name, DependencyError, MODULES_MARKER};
pub use descriptor::{kebab_key, ModuleDescriptor, ModuleManifest};
pub use registry::{ModuleRegistry, RegistryError};
