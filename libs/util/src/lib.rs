use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use toml::{map::Map, Value};

pub fn workspace_dir() -> PathBuf {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .map(|output| output.stdout)
        .unwrap_or_default();
    let cargo_path = String::from_utf8_lossy(&output).trim().to_string();

    match Path::new(&cargo_path).parent() {
        Some(dir) if !cargo_path.is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    let workspace_dir = workspace_dir();
    let config = std::fs::read_to_string(workspace_dir.join(config_name))
        .with_context(|| format!("failed to read {}", config_name))?;

    parse_config(&config)
        .with_context(|| format!("failed to parse {}", config_name))
}

pub fn parse_config(text: &str) -> anyhow::Result<Map<String, Value>> {
    Ok(toml::from_str::<Map<String, Value>>(text)?)
}

/// Looks up `[section] key`.
pub fn config_value<'a>(
    config: &'a Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<&'a Value> {
    config
        .get(section)
        .with_context(|| format!("failed to load {} config", section))?
        .get(key)
        .with_context(|| format!("failed to load {} config", key))
}

pub fn config_str(
    config: &Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<String> {
    let value = config_value(config, section, key)?
        .as_str()
        .with_context(|| format!("failed to parse {} config", key))?;

    Ok(value.to_string())
}

pub fn config_u64(
    config: &Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<u64> {
    let value = config_value(config, section, key)?
        .as_integer()
        .with_context(|| format!("failed to parse {} config", key))?;

    if value < 0 {
        bail!("{} config must not be negative", key);
    }

    Ok(value as u64)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_read_sections() {
        // Arrange
        let config = parse_config(
            r#"
            [news]
            base_url = "http://localhost:9000"
            fade_millis = 500
            "#,
        )
        .unwrap();

        // Act
        let base_url = config_str(&config, "news", "base_url");
        let fade_millis = config_u64(&config, "news", "fade_millis");

        // Assert
        assert_eq!(base_url.unwrap(), "http://localhost:9000");
        assert_eq!(fade_millis.unwrap(), 500);
    }

    #[test]
    fn test_missing_and_mistyped_keys() {
        let config = parse_config("[news]\nfade_millis = \"slow\"\n").unwrap();

        let err = config_str(&config, "web", "port").unwrap_err();
        assert_eq!(err.to_string(), "failed to load web config");

        let err = config_u64(&config, "news", "fade_millis").unwrap_err();
        assert_eq!(err.to_string(), "failed to parse fade_millis config");
    }

    #[test]
    fn test_workspace_config_is_readable() {
        let config = load_config("Config.toml").unwrap();

        assert!(config_str(&config, "news", "base_url").is_ok());
    }
}
