//! Configuration file management for Sportello.
//!
//! Supports reading secrets from `~/.config/sportello/secret.json`.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
}

/// OpenAI-compatible completion endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Loads the secret configuration file from ~/.config/sportello/secret.json
pub fn load_secret_config() -> Result<SecretConfig, String> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Err(format!(
            "Configuration file not found at: {}",
            config_path.display()
        ));
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        )
    })
}

/// Returns the path to the configuration file: ~/.config/sportello/secret.json
fn get_config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;
    Ok(home.join(".config").join("sportello").join("secret.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secret_config() {
        let config: SecretConfig = serde_json::from_str(
            r#"{"openai": {"api_key": "sk-test", "model_name": "gpt-4o"}}"#,
        )
        .unwrap();
        let openai = config.openai.unwrap();
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.model_name.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn test_parse_secret_config_without_openai_section() {
        let config: SecretConfig = serde_json::from_str("{}").unwrap();
        assert!(config.openai.is_none());
    }
}
