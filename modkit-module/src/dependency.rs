use std::fmt;

use crate::registry::ModuleRegistry;

/// Namespace segment that marks the start of a module path inside a
/// fully-qualified reference, e.g. `app::modules::billing`.
pub const MODULES_MARKER: &str = "modules";

/// Extract the short module name from a dependency reference.
///
/// For a `::`-separated path the segment immediately following the
/// `modules` marker wins; a path without the marker falls back to its last
/// segment; a bare name is returned as-is.
pub fn short_module_name(reference: &str) -> &str {
    let mut segments = reference.split("::").filter(|s| !s.is_empty());
    let mut last = reference;
    while let Some(segment) = segments.next() {
        if segment.eq_ignore_ascii_case(MODULES_MARKER) {
            if let Some(next) = segments.next() {
                return next;
            }
        }
        last = segment;
    }
    last
}

/// A module declared dependencies that are not registered yet.
///
/// Because modules register and boot in load order, a dependency that
/// registers *after* its dependent fails this check even though it would be
/// present once the whole process has booted. That is the ordering
/// contract: dependency declarations must reference modules that register
/// earlier in the load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyError {
    /// The dependent module's display name.
    pub module: String,
    /// Short names of the unmet dependencies, in declaration order.
    pub unmet: Vec<String>,
}

impl fmt::Display for DependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.unmet.len() == 1 { "" } else { "s" };
        write!(
            f,
            "Module {} depends on module{plural}: {}",
            self.module,
            self.unmet.join(", ")
        )
    }
}

impl std::error::Error for DependencyError {}

/// Verify a module's declared dependencies against the modules registered
/// so far. Runs at the very start of the module's boot sequence, before
/// any config or route side effect, so a failure leaves no partial state.
pub fn check_dependencies(
    module_name: &str,
    declared: &[String],
    registry: &ModuleRegistry,
) -> Result<(), DependencyError> {
    let unmet: Vec<String> = declared
        .iter()
        .map(|reference| short_module_name(reference))
        .filter(|short| !registry.is_registered(short))
        .map(str::to_string)
        .collect();
    if unmet.is_empty() {
        Ok(())
    } else {
        Err(DependencyError {
            module: module_name.to_string(),
            unmet,
        })
    }
}
