//! The fixed set of HTTP verbs a route module may export.

use std::fmt;

use axum::routing::MethodFilter;

/// Export name of the path-level middleware list.
pub const USE_BEFORE: &str = "useBefore";

/// A recognized verb export, in registration priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Post,
    Get,
    Put,
    Patch,
    Del,
}

impl Verb {
    /// All verbs, highest priority first.
    pub const ALL: [Verb; 5] = [Verb::Post, Verb::Get, Verb::Put, Verb::Patch, Verb::Del];

    /// Look up a verb by its export name (`del`, not `delete`).
    pub fn from_export(name: &str) -> Option<Self> {
        match name {
            "post" => Some(Verb::Post),
            "get" => Some(Verb::Get),
            "put" => Some(Verb::Put),
            "patch" => Some(Verb::Patch),
            "del" => Some(Verb::Del),
            _ => None,
        }
    }

    /// Name of the export that holds this verb's handler.
    pub fn export_name(self) -> &'static str {
        match self {
            Verb::Post => "post",
            Verb::Get => "get",
            Verb::Put => "put",
            Verb::Patch => "patch",
            Verb::Del => "del",
        }
    }

    /// Name of the server method the handler is registered with.
    pub fn method_name(self) -> &'static str {
        match self {
            Verb::Del => "delete",
            other => other.export_name(),
        }
    }

    /// Name of the export holding middleware that runs before this verb only.
    ///
    /// `useBefore` followed by the export name with its first letter
    /// upper-cased, so `del` gives `useBeforeDel`.
    pub fn middleware_key(self) -> &'static str {
        match self {
            Verb::Post => "useBeforePost",
            Verb::Get => "useBeforeGet",
            Verb::Put => "useBeforePut",
            Verb::Patch => "useBeforePatch",
            Verb::Del => "useBeforeDel",
        }
    }

    /// Position in the priority order.
    pub fn priority(self) -> usize {
        self as usize
    }

    pub fn method_filter(self) -> MethodFilter {
        match self {
            Verb::Post => MethodFilter::POST,
            Verb::Get => MethodFilter::GET,
            Verb::Put => MethodFilter::PUT,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Del => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    /// Displays the upper-cased method name, `DELETE` for `del`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.method_name().to_ascii_uppercase())
    }
}

/// Returns true for `useBefore` and every `useBefore<Verb>` key.
pub fn is_middleware_key(name: &str) -> bool {
    name == USE_BEFORE || Verb::ALL.iter().any(|v| v.middleware_key() == name)
}
