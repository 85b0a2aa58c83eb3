//! Configuration loader
//!
//! Loads the application configuration from a file, layers environment
//! overrides on top and validates the result.
//!
//! ## Loading Strategy
//! 1. Use the given path, or search the standard locations
//! 2. No file found: start from the built-in defaults
//! 3. Apply `TIKUS_*` environment overrides
//! 4. Validate; any problem is a `TikusError::Config`
//!
//! ## Environment Variables
//! - `TIKUS_IDLE_TIMEOUT`: idle timeout, seconds or a duration like `5m`
//! - `TIKUS_PATTERN`: movement pattern name
//! - `TIKUS_MOVEMENT_RANGE`: maximum random step in pixels
//! - `TIKUS_WORK_HOURS_ONLY`: restrict movement to work hours (true/false)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./tikus.{toml,json,yaml,yml}` (current working directory)
//! 2. `./config.{toml,json,yaml,yml}` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use tikus_common::time::parse_duration;
use tikus_domain::{Config, PatternKind, Result, TikusError};

const CONFIG_STEMS: [&str; 2] = ["tikus", "config"];
const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "json", "yaml", "yml"];

/// Load, override and validate the configuration
///
/// # Errors
/// Returns `TikusError::Config` if:
/// - An explicit `path` does not exist
/// - The file cannot be read or parsed
/// - An environment override is malformed
/// - The resulting configuration fails validation
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = load_from_file(path)?;
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations and falls back to the
/// defaults when nothing is found. The result is not validated.
///
/// # Errors
/// Returns `TikusError::Config` if the given file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TikusError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => match discover_config_path() {
            Some(p) => p,
            None => {
                tracing::info!("No config file found, using built-in defaults");
                return Ok(Config::default());
            }
        },
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TikusError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension. A file without an extension is
/// read as YAML; any other extension is rejected.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TikusError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TikusError::Config(format!("Invalid JSON format: {}", e))),
        "yaml" | "yml" => parse_yaml(contents),
        _ => Err(TikusError::Config(format!("Unsupported config format: {}", extension))),
    }
}

fn parse_yaml(contents: &str) -> Result<Config> {
    // An empty YAML document is `null`, which should mean "all defaults"
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(contents)
        .map_err(|e| TikusError::Config(format!("Invalid YAML format: {}", e)))
}

/// Search the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn discover_config_path() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| {
            CONFIG_STEMS.iter().flat_map(move |stem| {
                CONFIG_EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}")))
            })
        })
        .find(|path| path.is_file())
}

/// Apply `TIKUS_*` environment overrides
///
/// # Errors
/// Returns `TikusError::Config` when a set variable cannot be parsed.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    let scheduler = &mut config.scheduler;

    if let Some(raw) = env_var("TIKUS_IDLE_TIMEOUT") {
        scheduler.idle_timeout = parse_duration(&raw).map_err(|e| {
            TikusError::Config(format!("Invalid TIKUS_IDLE_TIMEOUT '{}': {}", raw, e))
        })?;
        tracing::debug!(
            idle_timeout = ?scheduler.idle_timeout,
            "Idle timeout overridden from environment"
        );
    }

    if let Some(raw) = env_var("TIKUS_PATTERN") {
        scheduler.pattern = raw.parse::<PatternKind>().map_err(TikusError::Config)?;
        tracing::debug!(pattern = %scheduler.pattern, "Pattern overridden from environment");
    }

    if let Some(raw) = env_var("TIKUS_MOVEMENT_RANGE") {
        scheduler.movement_range = raw.trim().parse::<f64>().map_err(|e| {
            TikusError::Config(format!("Invalid TIKUS_MOVEMENT_RANGE '{}': {}", raw, e))
        })?;
    }

    if let Some(only) = env_bool("TIKUS_WORK_HOURS_ONLY") {
        scheduler.work_hours.only = only;
    }

    Ok(())
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Returns `None` when the variable is unset.
fn env_bool(key: &str) -> Option<bool> {
    env_var(key)
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const OVERRIDE_VARS: [&str; 4] =
        ["TIKUS_IDLE_TIMEOUT", "TIKUS_PATTERN", "TIKUS_MOVEMENT_RANGE", "TIKUS_WORK_HOURS_ONLY"];

    fn clear_overrides() {
        for var in OVERRIDE_VARS {
            std::env::remove_var(var);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        (temp_file, path)
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        let cases = [("1", true), ("YES", true), ("on", true), ("0", false), ("off", false)];
        for (value, expected) in cases {
            std::env::set_var("TIKUS_TEST_BOOL", value);
            assert_eq!(env_bool("TIKUS_TEST_BOOL"), Some(expected), "value {value}");
        }

        std::env::remove_var("TIKUS_TEST_BOOL");
        assert_eq!(env_bool("TIKUS_TEST_BOOL"), None);
    }

    #[test]
    fn test_env_overrides_applied() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        std::env::set_var("TIKUS_IDLE_TIMEOUT", "2m");
        std::env::set_var("TIKUS_PATTERN", "Circle");
        std::env::set_var("TIKUS_MOVEMENT_RANGE", "42.5");
        std::env::set_var("TIKUS_WORK_HOURS_ONLY", "true");

        let mut config = Config::default();
        let result = apply_env_overrides(&mut config);
        clear_overrides();

        result.expect("overrides should apply");
        assert_eq!(config.scheduler.idle_timeout, Duration::from_secs(120));
        assert_eq!(config.scheduler.pattern, PatternKind::Circle);
        assert_eq!(config.scheduler.movement_range, 42.5);
        assert!(config.scheduler.work_hours.only);
    }

    #[test]
    fn test_env_override_invalid_pattern() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        std::env::set_var("TIKUS_PATTERN", "spiral");
        let result = apply_env_overrides(&mut Config::default());
        clear_overrides();

        let err = result.unwrap_err();
        assert!(matches!(err, TikusError::Config(ref msg) if msg.contains("spiral")));
    }

    #[test]
    fn test_env_override_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        std::env::set_var("TIKUS_IDLE_TIMEOUT", "soon");
        let result = apply_env_overrides(&mut Config::default());
        clear_overrides();

        assert!(matches!(result, Err(TikusError::Config(_))));
    }

    #[test]
    fn test_load_from_file_yaml() {
        let yaml = r#"
scheduler:
  idle_timeout: 5
  movement_interval: 0.5
  pattern: jiggle
  work_hours:
    only: true
    start: "08:00"
    end: "16:30"
    days: [0, 1, 2, 3]
  patterns:
    jiggle:
      max_distance: 4
runtime:
  verbosity: quiet
"#;
        let (_temp, path) = temp_config(yaml, "yaml");

        let config = load_from_file(Some(path.clone())).expect("Should load config from YAML file");
        assert_eq!(config.scheduler.idle_timeout, Duration::from_secs(5));
        assert_eq!(config.scheduler.pattern, PatternKind::Jiggle);
        assert_eq!(config.scheduler.work_hours.days.len(), 4);
        assert_eq!(config.scheduler.patterns.jiggle.max_distance, 4.0);
        assert_eq!(config.runtime.verbosity, tikus_domain::Verbosity::Quiet);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[scheduler]
movement_range = 25
pattern = "smooth"

[scheduler.adaptive]
enabled = false
"#;
        let (_temp, path) = temp_config(toml_content, "toml");

        let config = load_from_file(Some(path.clone())).expect("Should load config from TOML file");
        assert_eq!(config.scheduler.movement_range, 25.0);
        assert_eq!(config.scheduler.pattern, PatternKind::Smooth);
        assert!(!config.scheduler.adaptive.enabled);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/tikus.toml")));
        assert!(matches!(result, Err(TikusError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        let json = r#"{ "scheduler": { "work_hours": { "days": [] } } }"#;
        let (_temp, path) = temp_config(json, "json");
        let result = load(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let err = result.unwrap_err();
        assert!(matches!(err, TikusError::Config(ref msg) if msg.contains("work_hours.days")));
    }

    #[test]
    fn test_parse_config_formats() {
        assert!(parse_config("[runtime]\nstatus_interval = 10", Path::new("a.toml")).is_ok());
        assert!(parse_config(r#"{"runtime":{}}"#, Path::new("a.json")).is_ok());
        assert!(parse_config("runtime: {}", Path::new("a.yml")).is_ok());
        assert_eq!(parse_config("", Path::new("a.yaml")).unwrap(), Config::default());
        assert!(parse_config("key = value", Path::new("a.ini")).is_err());
        assert!(parse_config("{ not json", Path::new("a.json")).is_err());
    }

    #[test]
    fn test_discover_config_path_finds_only_files() {
        // A discovered candidate must be a regular file, never a directory
        if let Some(found) = discover_config_path() {
            assert!(found.is_file());
        }
    }
}
