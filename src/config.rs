use crate::ai::Preset;
use crate::core::ResolverConfig;
use reqwest::Url;
use std::env;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://akshay-cv-backend.onrender.com/chat";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CHAT_MODE must be `local` or `remote`, got `{0}`")]
    Mode(String),
    #[error("CHAT_PRESET must be `hosted` or `static`, got `{0}`")]
    Preset(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub owner_name: String,
    pub window_width: f32,
    pub window_height: f32,
    pub resolver: ResolverConfig,
}

impl Config {
    /// Reads `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let remote = match lookup("CHAT_MODE")
            .unwrap_or_else(|| "remote".to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "remote" | "server" => true,
            "local" | "static" => false,
            other => return Err(ConfigError::Mode(other.to_string())),
        };

        let endpoint_raw = lookup("CHAT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = if remote {
            match Url::parse(endpoint_raw.trim()) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
                Ok(url) => {
                    log::warn!("⚠️ Unsupported endpoint scheme `{}`, answering locally", url.scheme());
                    None
                }
                Err(e) => {
                    log::warn!("⚠️ Invalid CHAT_ENDPOINT `{}`: {}, answering locally", endpoint_raw, e);
                    None
                }
            }
        } else {
            None
        };

        let preset = match lookup("CHAT_PRESET") {
            Some(raw) => raw.parse::<Preset>().map_err(ConfigError::Preset)?,
            None if endpoint.is_some() => Preset::Hosted,
            None => Preset::Static,
        };

        let resolver = match endpoint {
            Some(url) => ResolverConfig::remote(url, preset),
            None => ResolverConfig::local(preset),
        };

        let window_width = lookup("WINDOW_WIDTH")
            .and_then(|v| v.parse::<f32>().ok())
            .filter(|v| *v > 0.0)
            .unwrap_or(1100.0);
        let window_height = lookup("WINDOW_HEIGHT")
            .and_then(|v| v.parse::<f32>().ok())
            .filter(|v| *v > 0.0)
            .unwrap_or(780.0);

        Ok(Self {
            owner_name: "Akshay Sayar".to_string(),
            window_width,
            window_height,
            resolver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResolverMode;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_hosted_remote() {
        let config = load(&[]).unwrap();
        assert_eq!(
            config.resolver.mode(),
            &ResolverMode::Remote {
                endpoint: Url::parse(DEFAULT_ENDPOINT).unwrap()
            }
        );
        assert_eq!(config.resolver.preset(), Preset::Hosted);
        assert_eq!(config.window_width, 1100.0);
    }

    #[test]
    fn local_mode_defaults_to_static_preset() {
        let config = load(&[("CHAT_MODE", "Local")]).unwrap();
        assert!(!config.resolver.is_remote());
        assert_eq!(config.resolver.preset(), Preset::Static);
    }

    #[test]
    fn explicit_preset_wins() {
        let config = load(&[("CHAT_MODE", "local"), ("CHAT_PRESET", "hosted")]).unwrap();
        assert_eq!(config.resolver.preset(), Preset::Hosted);
    }

    #[test]
    fn bad_endpoint_falls_back_to_local() {
        let config = load(&[("CHAT_ENDPOINT", "not a url")]).unwrap();
        assert!(!config.resolver.is_remote());
        let config = load(&[("CHAT_ENDPOINT", "ftp://example.com/chat")]).unwrap();
        assert!(!config.resolver.is_remote());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_eq!(
            load(&[("CHAT_MODE", "hybrid")]).unwrap_err(),
            ConfigError::Mode("hybrid".to_string())
        );
        assert!(matches!(
            load(&[("CHAT_PRESET", "fancy")]),
            Err(ConfigError::Preset(_))
        ));
    }

    #[test]
    fn window_size_ignores_garbage() {
        let config = load(&[("WINDOW_WIDTH", "wide"), ("WINDOW_HEIGHT", "640")]).unwrap();
        assert_eq!(config.window_width, 1100.0);
        assert_eq!(config.window_height, 640.0);
    }
}
