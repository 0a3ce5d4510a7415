use std::path::{Path, PathBuf};

/// Delegation seam for the host's resource loading.
///
/// The boot pipeline computes paths and namespace keys; actually loading
/// views, translations, and migrations, wiring event subscribers, and
/// discovering console command files is the host's business.
pub trait ResourceLoader {
    /// Wire one event subscriber, given its identifier from the module's
    /// events manifest.
    fn subscribe(&mut self, subscriber: &str);

    /// Load a view tree, namespaced under the module's kebab key.
    fn load_views(&mut self, dir: &Path, namespace: &str);

    /// Load a translation tree, namespaced under the module's kebab key.
    fn load_translations(&mut self, dir: &Path, namespace: &str);

    /// Load database migrations from a directory.
    fn load_migrations(&mut self, dir: &Path);

    /// Discover console command files in a directory (one command per
    /// file, name derived from the file base name).
    fn load_commands(&mut self, dir: &Path);
}

/// Loader that records every delegation it receives. Useful for tests and
/// for hosts that defer actual loading.
#[derive(Debug, Clone, Default)]
pub struct RecordingLoader {
    pub subscribers: Vec<String>,
    pub views: Vec<(PathBuf, String)>,
    pub translations: Vec<(PathBuf, String)>,
    pub migrations: Vec<PathBuf>,
    pub commands: Vec<PathBuf>,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceLoader for RecordingLoader {
    fn subscribe(&mut self, subscriber: &str) {
        self.subscribers.push(subscriber.to_string());
    }

    fn load_views(&mut self, dir: &Path, namespace: &str) {
        self.views.push((dir.to_path_buf(), namespace.to_string()));
    }

    fn load_translations(&mut self, dir: &Path, namespace: &str) {
        self.translations
            .push((dir.to_path_buf(), namespace.to_string()));
    }

    fn load_migrations(&mut self, dir: &Path) {
        self.migrations.push(dir.to_path_buf());
    }

    fn load_commands(&mut self, dir: &Path) {
        self.commands.push(dir.to_path_buf());
    }
}
