use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Registration input supplied by the host for one feature module.
///
/// The name is the module's display name (e.g. `"Billing"`); the root path
/// points at the directory holding the module's resource tree. Everything
/// else the bootstrap layer needs is derived from these two fields, so no
/// runtime introspection of the module's code location ever happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub name: String,
    pub root_path: PathBuf,
}

impl ModuleManifest {
    pub fn new(name: &str, root_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root_path: root_path.into(),
        }
    }
}

/// Identity of one registered module. Created once at registration time,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Display name, e.g. `"UserProfile"`.
    pub name: String,
    /// Absolute path to the module's resource tree.
    pub root_path: PathBuf,
    /// Lowercase hyphenated identifier used as config and route namespace
    /// prefix, e.g. `"user-profile"`.
    pub kebab_key: String,
}

impl ModuleDescriptor {
    pub fn from_manifest(manifest: &ModuleManifest) -> Self {
        Self {
            name: manifest.name.clone(),
            root_path: manifest.root_path.clone(),
            kebab_key: kebab_key(&manifest.name),
        }
    }

    /// The kebab key with hyphens replaced by underscores, matching how the
    /// module's name appears as a path segment in Rust-style namespaces.
    pub fn snake_key(&self) -> String {
        self.kebab_key.replace('-', "_")
    }

    /// Whether `candidate` names this module, under any of the spellings a
    /// namespace segment can carry: the display name, the kebab key, or the
    /// snake form. Comparison is ASCII case-insensitive.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.eq_ignore_ascii_case(&self.name)
            || candidate.eq_ignore_ascii_case(&self.kebab_key)
            || candidate.eq_ignore_ascii_case(&self.snake_key())
    }
}

/// Derive the lowercase hyphen-separated key for a module name.
///
/// Word boundaries are camel-case humps, underscores, spaces, and existing
/// hyphens: `"UserProfile"` -> `"user-profile"`, `"mail_log"` -> `"mail-log"`.
pub fn kebab_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_was_word = false;
    for c in name.chars() {
        if c == '_' || c == ' ' || c == '-' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_was_word = false;
        } else if c.is_ascii_uppercase() {
            if prev_was_word && !out.ends_with('-') {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_was_word = false;
        } else {
            out.push(c);
            prev_was_word = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out.trim_matches('-').to_string()
}
