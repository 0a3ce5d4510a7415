use modkit_module::MODULES_MARKER;
use serde::{Deserialize, Serialize};

/// How the matched route handles the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteHandler {
    /// A controller action, identified by its namespace path, e.g.
    /// `"app::modules::billing::http::controllers::InvoiceController::show"`.
    Controller { action: String },
    /// A closure-based handler, described by its provenance: the type it is
    /// bound to, if any, and the file it was declared in.
    Closure {
        bound_type: Option<String>,
        source_file: Option<String>,
    },
}

/// The route the dispatcher matched for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRoute {
    pub handler: RouteHandler,
}

/// Host collaborator exposing the matched route for the current request.
///
/// Classification is best-effort: implementations express "no route
/// matched" and dispatcher failures alike as `None`, so request dispatch
/// continues undisturbed whatever happens here.
pub trait RouteSource {
    fn matched_route(&self) -> Option<MatchedRoute>;
}

/// A fixed route source, for tests and single-route hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticRouteSource {
    route: Option<MatchedRoute>,
}

impl StaticRouteSource {
    pub fn new(route: Option<MatchedRoute>) -> Self {
        Self { route }
    }

    pub fn controller(action: &str) -> Self {
        Self::new(Some(MatchedRoute {
            handler: RouteHandler::Controller {
                action: action.into(),
            },
        }))
    }

    pub fn unmatched() -> Self {
        Self::new(None)
    }
}

impl RouteSource for StaticRouteSource {
    fn matched_route(&self) -> Option<MatchedRoute> {
        self.route.clone()
    }
}

/// Derive the module indicator string for a matched route.
///
/// Controller actions carry their namespace directly. Closures fall back
/// to the bound context's type name, then to the declaring file path with
/// path separators normalized to namespace separators. A closure with
/// neither yields no indicator.
pub fn indicator(route: &MatchedRoute) -> Option<String> {
    match &route.handler {
        RouteHandler::Controller { action } => Some(action.clone()),
        RouteHandler::Closure {
            bound_type,
            source_file,
        } => bound_type
            .clone()
            .or_else(|| source_file.as_ref().map(|p| p.replace(['/', '\\'], "::"))),
    }
}

/// Map an indicator string to the short module name it points into.
///
/// The application's own `<app_namespace>::modules::` marker is tried
/// first, then the conventional bare `modules::` default; the segment
/// immediately following the marker is the module name. Returns `None`
/// when the indicator points outside any module namespace.
pub fn module_segment(indicator: &str, app_namespace: &str) -> Option<String> {
    let lowered = indicator.to_ascii_lowercase();
    let app_marker = format!(
        "{}::{MODULES_MARKER}::",
        app_namespace.to_ascii_lowercase()
    );
    let default_marker = format!("{MODULES_MARKER}::");
    for marker in [app_marker.as_str(), default_marker.as_str()] {
        if let Some(pos) = lowered.find(marker) {
            let rest = &indicator[pos + marker.len()..];
            let segment = rest.split("::").next().unwrap_or("");
            if !segment.is_empty() {
                return Some(segment.to_string());
            }
        }
    }
    None
}
