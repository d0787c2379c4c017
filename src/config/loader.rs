// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, Result, ValidataError};
use std::path::{Path, PathBuf};

use super::schema::{ValidataConfig, ValidatorSettings};

/// Configuration file names to search for, in order of priority.
pub const CONFIG_FILES: &[&str] = &["validata.toml", ".validata.toml", ".config/validata.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if let Some(path) = find_in(&current) {
            return Some(path);
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        if let Some(path) = find_in(&home) {
            return Some(path);
        }
    }

    // XDG config directory
    let xdg = dirs::config_dir()?.join("validata").join("config.toml");
    xdg.exists().then_some(xdg)
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<ValidataConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(ValidataConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ValidataConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ValidataError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ValidataError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<ValidataConfig> {
    let config: ValidataConfig = toml::from_str(content).map_err(|e| {
        ValidataError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    validate_settings(&config.validator)?;
    Ok(config)
}

fn validate_settings(settings: &ValidatorSettings) -> Result<()> {
    if settings.group.trim().is_empty() {
        return Err(ValidataError::Config(ConfigError::InvalidValue {
            key: "validator.group".to_string(),
            message: "default group must not be empty".to_string(),
        }));
    }

    Ok(())
}

/// Merge two configurations, with the overlay taking precedence.
///
/// Groups, messages, attributes and error codes are merged key by key.
/// Validator settings come from the overlay unless it kept the defaults.
pub fn merge_configs(base: ValidataConfig, overlay: ValidataConfig) -> ValidataConfig {
    let defaults = ValidatorSettings::default();

    let validator = ValidatorSettings {
        group: if overlay.validator.group != defaults.group {
            overlay.validator.group
        } else {
            base.validator.group
        },
        default_error_code: if overlay.validator.default_error_code != defaults.default_error_code {
            overlay.validator.default_error_code
        } else {
            base.validator.default_error_code
        },
    };

    let mut merged = ValidataConfig { validator, ..base };
    merged.rules.extend(overlay.rules);
    merged.messages.extend(overlay.messages);
    merged.attributes.extend(overlay.attributes);
    merged.error_codes.extend(overlay.error_codes);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.validator.group, "create");
        assert_eq!(config.validator.default_error_code, 412);
    }

    #[test]
    fn test_parse_custom_config() {
        let toml = r#"
[validator]
group = "register"
default_error_code = 422

[rules.register]
email = "required|email"

[messages]
"email.required" = "We need your e-mail."

[attributes]
email = "e-mail address"

[error_codes]
"email.required" = 4001
"email.email" = "invalid-email"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.validator.group, "register");
        assert_eq!(config.validator.default_error_code, 422);
        assert!(config.rules.contains_group("register"));
        assert_eq!(config.messages["email.required"], "We need your e-mail.");
        assert_eq!(config.attributes["email"], "e-mail address");

        let failed = vec!["email.email".to_string()];
        assert_eq!(
            config.error_codes.resolve(&failed, &ErrorCode::default()),
            ErrorCode::Text("invalid-email".to_string())
        );
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = parse_config("[rules\n").unwrap_err();
        assert!(matches!(err, ValidataError::Config(ConfigError::ParseError { .. })));

        let err = parse_config("[validator]\ngroup = \"\"\n").unwrap_err();
        assert!(matches!(err, ValidataError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_from(Path::new("/nonexistent/validata.toml")).unwrap_err();
        assert!(matches!(err, ValidataError::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("validata.toml");
        std::fs::write(&config_path, "[rules.create]\nname = \"required\"\n").unwrap();

        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config_file_from(&nested), Some(config_path.clone()));

        let config = load_config_from(&config_path).unwrap();
        assert!(config.rules.contains_group("create"));
    }

    #[test]
    fn test_merge_configs() {
        let base = parse_config(
            r#"
[validator]
default_error_code = 400

[rules.create]
name = "required"

[rules.update]
name = "string"

[messages]
required = "Missing :attribute."
"#,
        )
        .unwrap();

        let overlay = parse_config(
            r#"
[rules.create]
name = "required|max:10"

[error_codes]
"name.max" = 4002
"#,
        )
        .unwrap();

        let merged = merge_configs(base, overlay);
        assert_eq!(merged.validator.default_error_code, 400);
        assert_eq!(merged.rules.len(), 2);
        assert!(merged.rules.contains_group("update"));
        assert_eq!(merged.messages["required"], "Missing :attribute.");
        assert_eq!(merged.error_codes.len(), 1);

        let create = merged.rules.group("create").unwrap();
        assert_eq!(create["name"].tokens(), vec!["required", "max:10"]);
    }
}
