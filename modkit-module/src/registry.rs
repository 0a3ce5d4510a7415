use crate::descriptor::{ModuleDescriptor, ModuleManifest};

/// Error produced when registering a module.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("module '{0}' already registered")]
    AlreadyRegistered(String),
}

/// Append-only ordered record of which modules have registered so far.
///
/// One instance lives for the whole application and is handed to every
/// module's boot context; dependency checks performed during boot read the
/// sequence as "already available", so registration order is significant.
/// There is no removal during normal operation.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Append a module. The descriptor is built here and never mutated
    /// afterwards. Registering the same name twice is rejected.
    pub fn register(&mut self, manifest: &ModuleManifest) -> Result<&ModuleDescriptor, RegistryError> {
        if self.is_registered(&manifest.name) {
            return Err(RegistryError::AlreadyRegistered(manifest.name.clone()));
        }
        self.modules.push(ModuleDescriptor::from_manifest(manifest));
        // Just pushed, so the vec is non-empty.
        Ok(&self.modules[self.modules.len() - 1])
    }

    /// Whether any registered module answers to `candidate` (display name,
    /// kebab key, or snake form; case-insensitive).
    pub fn is_registered(&self, candidate: &str) -> bool {
        self.modules.iter().any(|m| m.matches(candidate))
    }

    pub fn get(&self, candidate: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.matches(candidate))
    }

    /// All registered modules, in registration order.
    pub fn all(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Clear every registration. Exists for the test harness; production
    /// code never removes a module.
    pub fn reset(&mut self) {
        self.modules.clear();
    }
}
