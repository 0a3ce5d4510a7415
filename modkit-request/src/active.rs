use modkit_module::ModuleDescriptor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicator::{indicator, module_segment, RouteSource};

/// Outcome of classifying one module against the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Active,
    Inactive,
}

/// Shared, request-scoped classification result.
///
/// The first module whose classification resolves a module name fills the
/// slot; every later module in the same request reads it without
/// recomputation, so at most one module observes [`Activation::Active`].
///
/// Lifetime is one request: construct fresh (or call [`reset`]) at the
/// start of every request. In a concurrent host this must be a per-request
/// value, never a shared global, or results bleed across requests.
///
/// [`reset`]: ActiveModuleCache::reset
#[derive(Debug, Clone, Default)]
pub struct ActiveModuleCache {
    active: Option<String>,
}

impl ActiveModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolved active module name, once some module's classification
    /// has filled the slot.
    pub fn active_module(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Drop the resolution so the next request starts unresolved.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Classify `module` against the current request.
    ///
    /// With the slot already filled the answer is a plain comparison. With
    /// it empty, the matched route's indicator is derived and mapped to a
    /// module name: naming this module resolves it active and fills the
    /// slot; naming a different module fills the slot with that name and
    /// resolves this one inactive; an indicator that maps to no module
    /// name leaves the slot empty so a later module can still claim the
    /// request. Route-match failure is absorbed as "no indicator".
    pub fn classify(
        &mut self,
        module: &ModuleDescriptor,
        source: &dyn RouteSource,
        app_namespace: &str,
    ) -> Activation {
        if let Some(active) = &self.active {
            return if module.matches(active) {
                Activation::Active
            } else {
                Activation::Inactive
            };
        }

        let Some(route) = source.matched_route() else {
            debug!(module = %module.name, "no matched route; module stays inactive");
            return Activation::Inactive;
        };
        let Some(indicator) = indicator(&route) else {
            debug!(module = %module.name, "handler has no provenance; module stays inactive");
            return Activation::Inactive;
        };
        let Some(segment) = module_segment(&indicator, app_namespace) else {
            debug!(
                module = %module.name,
                %indicator,
                "indicator points outside any module namespace"
            );
            return Activation::Inactive;
        };

        if module.matches(&segment) {
            self.active = Some(module.name.clone());
            Activation::Active
        } else {
            self.active = Some(segment);
            Activation::Inactive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{MatchedRoute, RouteHandler, StaticRouteSource};
    use modkit_module::ModuleManifest;

    fn descriptor(name: &str) -> ModuleDescriptor {
        ModuleDescriptor::from_manifest(&ModuleManifest::new(name, format!("/srv/{name}")))
    }

    fn billing_route() -> StaticRouteSource {
        StaticRouteSource::controller(
            "app::modules::billing::http::controllers::InvoiceController::show",
        )
    }

    #[test]
    fn test_owning_module_resolves_active() {
        let mut cache = ActiveModuleCache::new();
        let outcome = cache.classify(&descriptor("Billing"), &billing_route(), "app");
        assert_eq!(outcome, Activation::Active);
        assert_eq!(cache.active_module(), Some("Billing"));
    }

    #[test]
    fn test_other_module_caches_the_owner() {
        let mut cache = ActiveModuleCache::new();
        let outcome = cache.classify(&descriptor("Shipping"), &billing_route(), "app");
        assert_eq!(outcome, Activation::Inactive);
        // Shipping's classification already resolved the request to billing.
        assert_eq!(cache.active_module(), Some("billing"));

        // Billing arrives later and short-circuits on the cached result.
        let outcome = cache.classify(&descriptor("Billing"), &billing_route(), "app");
        assert_eq!(outcome, Activation::Active);
    }

    #[test]
    fn test_cached_result_skips_recomputation() {
        let mut cache = ActiveModuleCache::new();
        cache.classify(&descriptor("Billing"), &billing_route(), "app");

        // A source that would now claim shipping is never consulted.
        let shipping_route = StaticRouteSource::controller(
            "app::modules::shipping::http::controllers::RateController::index",
        );
        let outcome = cache.classify(&descriptor("Shipping"), &shipping_route, "app");
        assert_eq!(outcome, Activation::Inactive);
        assert_eq!(cache.active_module(), Some("Billing"));
    }

    #[test]
    fn test_at_most_one_module_is_active() {
        let mut cache = ActiveModuleCache::new();
        let modules = [descriptor("Shipping"), descriptor("Billing"), descriptor("Audit")];
        let active_count = modules
            .iter()
            .filter(|m| cache.classify(m, &billing_route(), "app") == Activation::Active)
            .count();
        assert_eq!(active_count, 1);
    }

    #[test]
    fn test_unmatched_route_leaves_slot_empty() {
        let mut cache = ActiveModuleCache::new();
        let outcome = cache.classify(
            &descriptor("Billing"),
            &StaticRouteSource::unmatched(),
            "app",
        );
        assert_eq!(outcome, Activation::Inactive);
        assert!(cache.active_module().is_none());
    }

    #[test]
    fn test_unmappable_indicator_leaves_room_for_later_module() {
        // First module sees a handler outside any module namespace through
        // its own source; nothing is cached.
        let outside = StaticRouteSource::controller("app::http::controllers::HomeController");
        let mut cache = ActiveModuleCache::new();
        assert_eq!(
            cache.classify(&descriptor("Shipping"), &outside, "app"),
            Activation::Inactive
        );
        assert!(cache.active_module().is_none());

        // A later module can still claim the request.
        assert_eq!(
            cache.classify(&descriptor("Billing"), &billing_route(), "app"),
            Activation::Active
        );
    }

    #[test]
    fn test_closure_bound_type_resolves_module() {
        let source = StaticRouteSource::new(Some(MatchedRoute {
            handler: RouteHandler::Closure {
                bound_type: Some("app::modules::shipping::RateCalculator".into()),
                source_file: None,
            },
        }));
        let mut cache = ActiveModuleCache::new();
        assert_eq!(
            cache.classify(&descriptor("Shipping"), &source, "app"),
            Activation::Active
        );
    }

    #[test]
    fn test_closure_source_file_resolves_module() {
        let source = StaticRouteSource::new(Some(MatchedRoute {
            handler: RouteHandler::Closure {
                bound_type: None,
                source_file: Some("src/modules/user_profile/routes.rs".into()),
            },
        }));
        let mut cache = ActiveModuleCache::new();
        assert_eq!(
            cache.classify(&descriptor("UserProfile"), &source, "app"),
            Activation::Active
        );
    }

    #[test]
    fn test_activation_serialization() {
        let json = serde_json::to_string(&Activation::Active).unwrap();
        assert_eq!(json, "\"active\"");

        let parsed: Activation = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(parsed, Activation::Inactive);
    }

    #[test]
    fn test_reset_clears_resolution() {
        let mut cache = ActiveModuleCache::new();
        cache.classify(&descriptor("Billing"), &billing_route(), "app");
        assert!(cache.active_module().is_some());

        cache.reset();
        assert!(cache.active_module().is_none());
    }
}
