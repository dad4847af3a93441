use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::notify::{
    DisabledNotifier, EmailJsNotifier, NotificationCredentials, Notifier, DEFAULT_NOTIFY_TIMEOUT,
    EMAILJS_ENDPOINT,
};
use crate::util::paths::config_path;
use crate::wizard::DEFAULT_SENDER;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

pub const ENV_SERVICE_ID: &str = "VALENTINE_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "VALENTINE_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "VALENTINE_PUBLIC_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// EmailJS credentials
    pub credentials: NotificationCredentials,
    /// EmailJS send endpoint
    pub endpoint: String,
    /// Bound on a single notification send
    pub notify_timeout: Duration,
    /// Name signed on the receipt
    pub sender: String,
    /// Green-screen video for the celebration (None = built-in animation)
    pub video_path: Option<PathBuf>,
    /// Picture shown with the proposal
    pub image_path: Option<PathBuf>,
    /// Fixed compositor rate; None follows the video's native rate
    pub frame_rate: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: NotificationCredentials::default(),
            endpoint: EMAILJS_ENDPOINT.to_string(),
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
            sender: DEFAULT_SENDER.to_string(),
            video_path: None,
            image_path: None,
            frame_rate: None,
        }
    }
}

/// `[notify]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlNotifyConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `[assets]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlAssetsConfig {
    pub video: Option<PathBuf>,
    pub image: Option<PathBuf>,
    pub frame_rate: Option<f64>,
}

/// `[card]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlCardConfig {
    pub sender: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub notify: Option<TomlNotifyConfig>,
    pub assets: Option<TomlAssetsConfig>,
    pub card: Option<TomlCardConfig>,
}

impl Config {
    /// Load from `~/.valentine/config.toml` and the environment.
    ///
    /// A missing file is replaced with the example; a malformed one is
    /// logged and ignored.
    pub fn load() -> Self {
        let mut config = Config::default();
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        if config_file.exists() {
            match fs::read_to_string(&config_file) {
                Ok(contents) => match toml::from_str::<TomlConfig>(&contents) {
                    Ok(toml_config) => {
                        let base = config_file.parent().unwrap_or_else(|| Path::new("."));
                        config.apply_toml(toml_config, base);
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %config_file.display(),
                            error = %e,
                            "Ignoring malformed config file"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %config_file.display(),
                        error = %e,
                        "Failed to read config file"
                    );
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Parse config text, resolving relative asset paths against `base`
    pub fn from_toml_str(contents: &str, base: &Path) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.apply_toml(toml_config, base);
        Ok(config)
    }

    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::debug!(error = %e, "Failed to create config directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::debug!(path = %path.display(), error = %e, "Failed to write example config");
        }
    }

    /// Overlay values from a parsed file
    pub fn apply_toml(&mut self, toml_config: TomlConfig, base: &Path) {
        if let Some(notify) = toml_config.notify {
            if let Some(v) = notify.service_id {
                self.credentials.service_id = v;
            }
            if let Some(v) = notify.template_id {
                self.credentials.template_id = v;
            }
            if let Some(v) = notify.public_key {
                self.credentials.public_key = v;
            }
            if let Some(v) = notify.endpoint {
                self.endpoint = v;
            }
            if let Some(secs) = notify.timeout_secs {
                self.notify_timeout = Duration::from_secs(secs.max(1));
            }
        }

        if let Some(assets) = toml_config.assets {
            if let Some(video) = assets.video {
                self.video_path = Some(resolve(base, video));
            }
            if let Some(image) = assets.image {
                self.image_path = Some(resolve(base, image));
            }
            if let Some(rate) = assets.frame_rate {
                self.frame_rate = Some(rate);
            }
        }

        if let Some(sender) = toml_config.card.and_then(|c| c.sender) {
            if !sender.trim().is_empty() {
                self.sender = sender;
            }
        }
    }

    /// Overlay credentials from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(v) = non_empty(ENV_SERVICE_ID) {
            self.credentials.service_id = v;
        }
        if let Some(v) = non_empty(ENV_TEMPLATE_ID) {
            self.credentials.template_id = v;
        }
        if let Some(v) = non_empty(ENV_PUBLIC_KEY) {
            self.credentials.public_key = v;
        }
    }

    /// Build the notifier these settings describe
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        if self.credentials.is_complete() {
            Arc::new(EmailJsNotifier::with_endpoint(
                self.credentials.clone(),
                self.endpoint.clone(),
            ))
        } else {
            tracing::warn!("Notification credentials incomplete; receipts will not be emailed");
            Arc::new(DisabledNotifier)
        }
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_toml_str(EXAMPLE_CONFIG, Path::new("/tmp")).unwrap();
        assert_eq!(config.sender, "Maki");
        assert_eq!(config.notify_timeout, DEFAULT_NOTIFY_TIMEOUT);
        assert!(config.video_path.is_none());
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_sections_override_defaults() {
        let text = r#"
            [card]
            sender = "Rin"

            [notify]
            service_id = "svc"
            template_id = "tpl"
            public_key = "key"
            timeout_secs = 4

            [assets]
            video = "happy.mp4"
            image = "/abs/meow.jpg"
            frame_rate = 24
        "#;
        let config = Config::from_toml_str(text, Path::new("/home/me/.valentine")).unwrap();
        assert_eq!(config.sender, "Rin");
        assert!(config.credentials.is_complete());
        assert_eq!(config.notify_timeout, Duration::from_secs(4));
        assert_eq!(
            config.video_path,
            Some(PathBuf::from("/home/me/.valentine/happy.mp4"))
        );
        assert_eq!(config.image_path, Some(PathBuf::from("/abs/meow.jpg")));
        assert_eq!(config.frame_rate, Some(24.0));
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let config =
            Config::from_toml_str("[notify]\ntimeout_secs = 0\n", Path::new(".")).unwrap();
        assert_eq!(config.notify_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result = Config::from_toml_str("[notify\nservice_id = 1", Path::new("."));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides_credentials() {
        let env: HashMap<&str, &str> = [
            (ENV_SERVICE_ID, "env-svc"),
            (ENV_TEMPLATE_ID, ""),
            (ENV_PUBLIC_KEY, "env-key"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.credentials.template_id = "file-tpl".into();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.credentials.service_id, "env-svc");
        assert_eq!(config.credentials.template_id, "file-tpl");
        assert_eq!(config.credentials.public_key, "env-key");
    }
}
