//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Parse every pattern in its mode and report syntax errors by route
//! - Check route names and observability values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Conflicts between routes are found by the build, not here

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::RouterConfig;
use crate::pattern::parse;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("route name `{0}` is used more than once")]
    DuplicateName(String),

    #[error("route `{name}`: {message}")]
    InvalidPattern { name: String, message: String },

    #[error("invalid log level `{0}`")]
    InvalidLogLevel(String),

    #[error("invalid metrics address `{0}`")]
    InvalidMetricsAddress(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName(route.name.clone()));
        }

        if let Err(e) = parse(&route.pattern, route.literal) {
            errors.push(ValidationError::InvalidPattern {
                name: route.name.clone(),
                message: e.to_string(),
            });
        }
    }

    let observability = &config.observability;
    if EnvFilter::try_new(&observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(observability.log_level.clone()));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(name: &str, pattern: &str) -> RouteConfig {
        RouteConfig {
            name: name.to_string(),
            pattern: pattern.to_string(),
            literal: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = RouterConfig {
            routes: vec![route("a", "/a"), route("b", "/b/{id}")],
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RouterConfig {
            routes: vec![
                route("a", "/a"),
                route("a", "/b"),
                route("", "/c"),
                route("bad", "no-slash"),
            ],
            ..Default::default()
        };
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], ValidationError::DuplicateName("a".into()));
        assert_eq!(errors[1], ValidationError::EmptyName { index: 2 });
        assert!(matches!(&errors[2], ValidationError::InvalidPattern { name, .. } if name == "bad"));
        assert!(matches!(errors[3], ValidationError::InvalidMetricsAddress(_)));
    }

    #[test]
    fn test_literal_mode_is_respected() {
        let mut raw = route("raw", "/{x");
        assert!(validate_config(&RouterConfig {
            routes: vec![raw.clone()],
            ..Default::default()
        })
        .is_err());

        raw.literal = true;
        assert!(validate_config(&RouterConfig {
            routes: vec![raw],
            ..Default::default()
        })
        .is_ok());
    }
}
