use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One module's route definitions, grouped under its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGroup {
    /// Route-name prefix for every route in the group, e.g. `"billing::"`.
    pub name_prefix: String,
    /// Namespace the group's controller actions resolve under, e.g.
    /// `"app::modules::billing::http::controllers"`.
    pub controller_namespace: String,
    /// Path to the module's route definition file.
    pub source: PathBuf,
}

/// Capability seam for the host web framework's router.
///
/// Exactly one implementation is selected by host configuration at
/// startup; the boot pipeline never inspects which framework is behind it.
pub trait RouteRegistrar {
    fn register_group(&mut self, group: RouteGroup) -> Result<(), String>;
}

/// Registrar that records every group it is handed. Useful for tests and
/// for hosts that mount routes in a later phase.
#[derive(Debug, Clone, Default)]
pub struct RecordingRegistrar {
    groups: Vec<RouteGroup>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[RouteGroup] {
        &self.groups
    }
}

impl RouteRegistrar for RecordingRegistrar {
    fn register_group(&mut self, group: RouteGroup) -> Result<(), String> {
        self.groups.push(group);
        Ok(())
    }
}
