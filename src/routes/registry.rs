//! Route module registry: every route file exports a [`RouteModule`]; the registry derives its
//! URL prefix from the module path, applies guards and nests it under `ROUTE_PREFIX`.

use crate::extractors::auth::{require_roles, require_superuser, RoleGuard};
use crate::state::AppState;
use axum::{middleware, Router};
use std::collections::BTreeMap;

pub struct RouteModule {
    /// `module_path!()` of the declaring file.
    pub module_path: &'static str,
    /// Explicit prefix; overrides the derived one.
    pub prefix: Option<&'static str>,
    pub router: Router<AppState>,
    /// When non-empty, callers must hold one of these roles.
    pub roles: &'static [&'static str],
}

impl RouteModule {
    pub fn new(module_path: &'static str, router: Router<AppState>) -> Self {
        RouteModule {
            module_path,
            prefix: None,
            router,
            roles: &[],
        }
    }

    pub fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn with_roles(mut self, roles: &'static [&'static str]) -> Self {
        self.roles = roles;
        self
    }

    /// Prefix relative to `ROUTE_PREFIX`.
    pub fn resolved_prefix(&self) -> String {
        match self.prefix {
            Some(p) => normalize(p),
            None => derive_prefix(self.module_path),
        }
    }

    pub fn is_core(&self) -> bool {
        !self.module_path.split("::").any(|s| s == "app")
    }
}

/// Leading `/`, no trailing `/`, no doubled separators.
pub fn normalize(path: &str) -> String {
    let joined = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined)
}

/// Prefix from a module path: segments after the last `routes` segment, with `_route`/`_routes`
/// stripped from the file name. A file named like its folder collapses into the folder.
pub fn derive_prefix(module_path: &str) -> String {
    let segments: Vec<&str> = module_path.split("::").collect();
    let start = segments
        .iter()
        .rposition(|s| *s == "routes")
        .map(|i| i + 1)
        .unwrap_or(segments.len().saturating_sub(1));
    let mut parts: Vec<String> = segments[start..].iter().map(|s| s.to_string()).collect();
    if let Some(last) = parts.last_mut() {
        for suffix in ["_routes", "_route"] {
            if let Some(stripped) = last.strip_suffix(suffix) {
                *last = stripped.to_string();
                break;
            }
        }
    }
    if parts.len() >= 2 && parts[parts.len() - 1] == parts[parts.len() - 2] {
        parts.pop();
    }
    normalize(&parts.join("/"))
}

pub fn join_prefix(route_prefix: &str, prefix: &str) -> String {
    normalize(&format!("{}/{}", route_prefix, prefix))
}

fn is_admin(prefix: &str) -> bool {
    prefix.to_ascii_lowercase().contains("admin")
}

/// Documentation tag: core modules vs application modules.
pub fn tag(module: &RouteModule) -> String {
    let title = module
        .resolved_prefix()
        .trim_start_matches('/')
        .replace('/', " ")
        .replace('_', " ");
    if module.is_core() {
        format!("Core API - {}", title)
    } else {
        format!("User API - {}", title)
    }
}

/// Mount all modules under `route_prefix`. Modules sharing a prefix are merged.
pub fn mount(state: &AppState, route_prefix: &str, modules: Vec<RouteModule>) -> Router<AppState> {
    let mut by_prefix: BTreeMap<String, Router<AppState>> = BTreeMap::new();
    for module in modules {
        let prefix = module.resolved_prefix();
        let full = join_prefix(route_prefix, &prefix);
        let mut router = module.router.clone();
        if is_admin(&prefix) {
            router = router.route_layer(middleware::from_fn_with_state(state.clone(), require_superuser));
        }
        if !module.roles.is_empty() {
            let guard = RoleGuard {
                state: state.clone(),
                roles: module.roles,
            };
            router = router.route_layer(middleware::from_fn_with_state(guard, require_roles));
        }
        tracing::debug!(prefix = %full, tag = %tag(&module), "mounted route module");
        let merged = match by_prefix.remove(&full) {
            Some(existing) => existing.merge(router),
            None => router,
        };
        by_prefix.insert(full, merged);
    }
    by_prefix
        .into_iter()
        .fold(Router::new(), |app, (prefix, router)| {
            if prefix == "/" {
                app.merge(router)
            } else {
                app.nest(&prefix, router)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_prefix() {
        assert_eq!(derive_prefix("swx_api::routes::auth"), "/auth");
        assert_eq!(derive_prefix("swx_api::routes::user::profile"), "/user/profile");
        assert_eq!(derive_prefix("swx_api::routes::utils::language"), "/utils/language");
        assert_eq!(derive_prefix("swx_api::app::routes::qa_article"), "/qa_article");
        assert_eq!(derive_prefix("swx_api::app::routes::v1::product"), "/v1/product");
        assert_eq!(derive_prefix("swx_api::app::routes::product_route"), "/product");
        assert_eq!(derive_prefix("swx_api::routes::user::user_routes"), "/user");
    }

    #[test]
    fn test_normalize_and_join() {
        assert_eq!(normalize("admin/user/"), "/admin/user");
        assert_eq!(normalize("//x//y"), "/x/y");
        assert_eq!(join_prefix("/api", "/auth"), "/api/auth");
        assert_eq!(join_prefix("/api/", "auth/"), "/api/auth");
        assert_eq!(join_prefix("", "/"), "/");
    }

    #[test]
    fn test_explicit_prefix_and_tags() {
        let m = RouteModule::new("swx_api::routes::whatever", Router::new()).with_prefix("custom/");
        assert_eq!(m.resolved_prefix(), "/custom");
        assert_eq!(tag(&m), "Core API - custom");
        let app = RouteModule::new("swx_api::app::routes::qa_article", Router::new());
        assert_eq!(tag(&app), "User API - qa article");
    }

    #[test]
    fn test_admin_detection() {
        assert!(is_admin("/Admin/user"));
        assert!(!is_admin("/user/profile"));
    }
}
