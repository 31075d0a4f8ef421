//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct OrdnerConfig {
    /// Where the route tree lives.
    pub routes: RoutesConfig,

    /// Registration pass settings.
    pub registration: RegistrationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Route tree location.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RoutesConfig {
    /// Root directory of the route tree, relative to the working directory.
    pub dir: PathBuf,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("routes"),
        }
    }
}

/// Registration pass settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Print the route table while registering.
    pub logging: bool,

    /// Color the route table.
    pub color: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            logging: true,
            color: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
