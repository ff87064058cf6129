//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::router::{Router, RouterBuilder};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Build failed: {0}")]
    Build(#[from] crate::Error),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Compile a validated configuration; each route's value is its name.
pub fn compile_config(config: &RouterConfig) -> Result<Router<String>, ConfigError> {
    let mut builder = RouterBuilder::new();
    for route in &config.routes {
        if route.literal {
            builder.add_literal(&route.pattern, route.name.clone())?;
        } else {
            builder.add(&route.pattern, route.name.clone())?;
        }
    }
    let router = builder.build(config.build_options())?;
    tracing::info!(
        route_count = router.route_count(),
        state_count = router.state_count(),
        engine = router.engine().kind(),
        "Route table loaded"
    );
    Ok(router)
}

/// Load, validate and compile in one step.
pub fn load_router(path: &Path) -> Result<Router<String>, ConfigError> {
    compile_config(&load_config(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_and_compile() {
        let config = parse_config(
            r#"
            compress = true

            [[routes]]
            name = "user"
            pattern = "/users/{id}"

            [[routes]]
            name = "braces"
            pattern = "/{raw}"
            literal = true
            "#,
        )
        .unwrap();
        let router = compile_config(&config).unwrap();
        assert!(router.is_compressed());
        assert_eq!(router.route("/users/7").map(String::as_str), Some("user"));
        assert_eq!(router.route("/%7Braw%7D").map(String::as_str), Some("braces"));
        assert_eq!(router.route("/raw"), None);
    }

    #[test]
    fn test_validation_errors_are_reported_together() {
        let err = parse_config(
            r#"
            [[routes]]
            name = "x"
            pattern = "/a/"

            [[routes]]
            name = "x"
            pattern = "/b"
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_conflict_is_a_build_error() {
        let config = parse_config(
            r#"
            [[routes]]
            name = "a"
            pattern = "/{x}"

            [[routes]]
            name = "b"
            pattern = "/{y}"
            "#,
        )
        .unwrap();
        assert!(matches!(
            compile_config(&config),
            Err(ConfigError::Build(Error::Conflict(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/routes.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(parse_config("routes = 3"), Err(ConfigError::Parse(_))));
    }
}
