use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use modkit_config::{merge_module_config, ConfigStore};
use modkit_module::{check_dependencies, ModuleDescriptor, ModuleRegistry};
use modkit_request::{ActiveModuleCache, Activation, RouteSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BootError, Result};
use crate::module::Module;
use crate::registrar::{RouteGroup, RouteRegistrar};
use crate::resources::ResourceLoader;

/// Steps of the per-module boot pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootStep {
    Registered,
    DependenciesChecked,
    ConfigMerged,
    EventsSubscribed,
    RoutesRegistered,
    ResourcesDelegated,
}

/// One completed pipeline step for one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootEvent {
    pub module: String,
    pub step: BootStep,
    pub timestamp: DateTime<Utc>,
}

/// Owns the registry and configuration state and drives each module
/// through registration, boot, and request-time classification.
///
/// Registration appends the module to the registry; boot then runs the
/// pipeline: dependency check, config merge, event subscription, route
/// registration, resource delegation. The dependency check comes first so
/// a failure leaves no partial state for that module; modules booted
/// earlier are unaffected.
pub struct BootContext {
    registry: ModuleRegistry,
    config: ConfigStore,
    app_namespace: String,
    events: Vec<BootEvent>,
}

impl BootContext {
    /// `app_namespace` is the application's root namespace (e.g. `"app"`),
    /// used both for controller namespaces handed to the route registrar
    /// and as the preferred marker when classifying requests.
    pub fn new(app_namespace: &str) -> Self {
        Self {
            registry: ModuleRegistry::new(),
            config: ConfigStore::new(),
            app_namespace: app_namespace.to_string(),
            events: Vec::new(),
        }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Append the module to the registry. Must happen before [`boot`], so
    /// that dependency checks of later modules see it as available.
    ///
    /// [`boot`]: BootContext::boot
    pub fn register(&mut self, module: &dyn Module) -> Result<ModuleDescriptor> {
        let manifest = module.manifest();
        let descriptor = self.registry.register(&manifest)?.clone();
        debug!(module = %descriptor.name, key = %descriptor.kebab_key, "module registered");
        self.record(&descriptor.name, BootStep::Registered);
        Ok(descriptor)
    }

    /// Run the module's boot pipeline. The module must be registered.
    pub fn boot(
        &mut self,
        module: &dyn Module,
        routes: &mut dyn RouteRegistrar,
        resources: &mut dyn ResourceLoader,
    ) -> Result<()> {
        let manifest = module.manifest();
        let descriptor = self
            .registry
            .get(&manifest.name)
            .cloned()
            .ok_or_else(|| BootError::NotRegistered(manifest.name.clone()))?;

        let declared = read_string_list(&descriptor.root_path.join("module/dependencies.json"))?;
        check_dependencies(&descriptor.name, &declared, &self.registry)?;
        self.record(&descriptor.name, BootStep::DependenciesChecked);

        merge_module_config(&descriptor, &mut self.config)?;
        self.record(&descriptor.name, BootStep::ConfigMerged);

        for subscriber in read_string_list(&descriptor.root_path.join("module/events.json"))? {
            resources.subscribe(&subscriber);
        }
        self.record(&descriptor.name, BootStep::EventsSubscribed);

        let routes_file = descriptor.root_path.join("module/routes.json");
        if routes_file.is_file() {
            let group = route_group(&descriptor, &self.app_namespace, routes_file);
            routes
                .register_group(group)
                .map_err(|reason| BootError::Route {
                    module: descriptor.name.clone(),
                    reason,
                })?;
            self.record(&descriptor.name, BootStep::RoutesRegistered);
        } else {
            debug!(module = %descriptor.name, "no routes file");
        }

        self.delegate_resources(&descriptor, resources);
        self.record(&descriptor.name, BootStep::ResourcesDelegated);
        Ok(())
    }

    /// Register then boot, the order every module goes through at
    /// application start.
    pub fn register_and_boot(
        &mut self,
        module: &dyn Module,
        routes: &mut dyn RouteRegistrar,
        resources: &mut dyn ResourceLoader,
    ) -> Result<()> {
        self.register(module)?;
        self.boot(module, routes, resources)
    }

    /// Classify the current request against every module, in registration
    /// order, and run the activation hook of the single module that owns
    /// it. Returns the resolved active module name, if any.
    ///
    /// The classification cache is created fresh per call, which is what
    /// keeps it request-scoped: results never bleed into the next request.
    pub fn run_request(&self, modules: &[&dyn Module], source: &dyn RouteSource) -> Option<String> {
        let mut cache = ActiveModuleCache::new();
        for module in modules {
            let manifest = module.manifest();
            let Some(descriptor) = self.registry.get(&manifest.name) else {
                warn!(module = %manifest.name, "skipping unregistered module in request classification");
                continue;
            };
            if cache.classify(descriptor, source, &self.app_namespace) == Activation::Active {
                debug!(module = %descriptor.name, "module owns the request; running activation hook");
                module.active_boot();
            }
        }
        cache.active_module().map(str::to_string)
    }

    /// Completed pipeline steps, in execution order.
    pub fn events(&self) -> &[BootEvent] {
        &self.events
    }

    pub fn events_for(&self, module: &str) -> Vec<&BootEvent> {
        self.events.iter().filter(|e| e.module == module).collect()
    }

    /// Clear registry, configuration, and the boot log. Exists for the
    /// test harness.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.config.reset();
        self.events.clear();
    }

    fn record(&mut self, module: &str, step: BootStep) {
        self.events.push(BootEvent {
            module: module.to_string(),
            step,
            timestamp: Utc::now(),
        });
    }

    fn delegate_resources(&self, descriptor: &ModuleDescriptor, resources: &mut dyn ResourceLoader) {
        let views = descriptor.root_path.join("module/resources/views");
        if views.is_dir() {
            resources.load_views(&views, &descriptor.kebab_key);
        }
        let lang = descriptor.root_path.join("module/resources/lang");
        if lang.is_dir() {
            resources.load_translations(&lang, &descriptor.kebab_key);
        }
        let migrations = descriptor.root_path.join("module/database/migrations");
        if migrations.is_dir() {
            resources.load_migrations(&migrations);
        }
        let commands = descriptor.root_path.join("console/commands");
        if commands.is_dir() {
            resources.load_commands(&commands);
        }
    }
}

fn route_group(descriptor: &ModuleDescriptor, app_namespace: &str, source: PathBuf) -> RouteGroup {
    RouteGroup {
        name_prefix: format!("{}::", descriptor.kebab_key),
        controller_namespace: format!(
            "{app_namespace}::modules::{}::http::controllers",
            descriptor.snake_key()
        ),
        source,
    }
}

/// Read a JSON list of strings, treating a missing file as empty. Both the
/// dependency manifest and the events manifest are optional.
fn read_string_list(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
