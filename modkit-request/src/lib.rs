pub mod active;
pub mod indicator;

// Re-export key types for convenience.
pub use active::{ActiveModuleCache, Activation};
pub use indicator::{
    indicator, module_segment, MatchedRoute, RouteHandler, RouteSource, StaticRouteSource,
};
