//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, every pattern parsed)
//!     → RouterConfig (validated, immutable)
//!     → compile_config → Router<String> (value = route name)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and compiles the new table
//!     → new Router sent over a channel
//!     → owner swaps it into a SharedRouter
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A failed reload keeps the router currently in effect

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{compile_config, load_config, load_router, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, RouteConfig, RouterConfig};
pub use watcher::ConfigWatcher;
