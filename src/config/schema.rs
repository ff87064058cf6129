//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::router::BuildOptions;

/// Root configuration: a route table plus build and observability settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Build the CSR encoding instead of the dense table.
    pub compress: bool,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Routes in priority-free registration order; ids follow this order.
    pub routes: Vec<RouteConfig>,
}

impl RouterConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            compress: self.compress,
        }
    }
}

/// One route of the table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier, returned on match.
    pub name: String,

    /// Path pattern, e.g. `/users/{id}`.
    pub pattern: String,

    /// Match every character of `pattern` literally.
    #[serde(default)]
    pub literal: bool,
}

/// Logging and metrics settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
