//! Naming conventions for generated resources: snake_case for files, tables and modules,
//! PascalCase for types.

/// Convert an identifier to snake_case.
/// e.g. "UserProfile" -> "user_profile", "languageTranslation" -> "language_translation",
/// "HTTPServer" -> "http_server"
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_lower = chars.get(i + 1).map(|n| n.is_lowercase()).unwrap_or(false);
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_lower);
                if boundary && !out.ends_with('_') {
                    out.push('_');
                }
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a snake_case identifier to PascalCase.
/// e.g. "user_profile" -> "UserProfile"
pub fn to_pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split('_').filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `(TypeName, table_name)` for free-form input: dashes and spaces become underscores.
pub fn format_name(name: &str) -> (String, String) {
    let cleaned = name.trim().replace(['-', ' '], "_");
    let snake = to_snake_case(&cleaned);
    (to_pascal_case(&snake), snake)
}

/// Split an API version off a resource path.
/// e.g. "v1/product" -> (Some("v1"), "product"), "product" -> (None, "product")
pub fn extract_version(name: &str) -> (Option<String>, String) {
    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() == 2 && is_version(parts[0]) {
        return (Some(parts[0].to_string()), parts[1].to_string());
    }
    (None, name.to_string())
}

fn is_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .map(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// `(base, file, type)` names for one component of a resource. Models drop the suffix.
pub fn normalize_resource_names(raw: &str, suffix: &str) -> (String, String, String) {
    let last = raw.rsplit('/').next().unwrap_or(raw).trim();
    let base = to_snake_case(&last.replace(['-', ' '], "_"));
    if suffix.eq_ignore_ascii_case("model") {
        let type_name = to_pascal_case(&base);
        (base.clone(), base, type_name)
    } else {
        let suffix = suffix.to_ascii_lowercase();
        (
            base.clone(),
            format!("{}_{}", base, suffix),
            format!("{}{}", to_pascal_case(&base), to_pascal_case(&suffix)),
        )
    }
}

/// Where a resource lives in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath {
    /// Folder relative to the project root.
    pub folder: &'static str,
    /// Rust module path of that folder.
    pub module: &'static str,
    pub version: Option<String>,
    pub resource: String,
}

/// `core/<name>` goes to `src/core_ext`; everything else to `src/app`. A leading `vN/` is the
/// API version.
pub fn resolve_base_path(name: &str) -> BasePath {
    let (core, rest) = match name.strip_prefix("core/") {
        Some(rest) => (true, rest),
        None => (false, name),
    };
    let (version, resource) = extract_version(rest);
    let (folder, module) = if core {
        ("src/core_ext", "crate::core_ext")
    } else {
        ("src/app", "crate::app")
    };
    BasePath {
        folder,
        module,
        version,
        resource,
    }
}
