use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::storage::DEFAULT_IMAGES_DIR;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// Process configuration, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub image_model: String,
    pub default_size: String,
    /// `None` disables caller authentication.
    pub api_secret_key: Option<String>,
    pub images_dir: PathBuf,
    pub save_images: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let Some(openai_api_key) = non_blank("OPENAI_API_KEY") else {
            bail!("OPENAI_API_KEY is not set in environment variables");
        };
        let port = match non_blank("PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) => port,
                Err(err) => bail!("invalid PORT {raw:?}: {err}"),
            },
            None => DEFAULT_PORT,
        };
        let save_images = non_blank("SAVE_IMAGES")
            .map(|value| !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Ok(Self {
            port,
            openai_api_key,
            openai_base_url: non_blank("OPENAI_BASE_URL")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            image_model: non_blank("OPENAI_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            default_size: non_blank("DEFAULT_IMAGE_SIZE")
                .unwrap_or_else(|| DEFAULT_IMAGE_SIZE.to_string()),
            api_secret_key: non_blank("API_SECRET_KEY"),
            images_dir: non_blank("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR)),
            save_images,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use super::Config;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_provider_key_is_set() -> anyhow::Result<()> {
        let config = config_from(&[("OPENAI_API_KEY", "sk-test")])?;
        assert_eq!(config.port, 5000);
        assert_eq!(config.image_model, "dall-e-3");
        assert_eq!(config.default_size, "1024x1024");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.images_dir, Path::new("images"));
        assert_eq!(config.api_secret_key, None);
        assert!(config.save_images);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        Ok(())
    }

    #[test]
    fn missing_provider_key_is_fatal() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("OPENAI_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn overrides_are_read() -> anyhow::Result<()> {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8081"),
            ("API_SECRET_KEY", "s3cret"),
            ("OPENAI_BASE_URL", "http://localhost:9999/v1/"),
            ("IMAGES_DIR", "/tmp/generated"),
            ("SAVE_IMAGES", "false"),
        ])?;
        assert_eq!(config.port, 8081);
        assert_eq!(config.api_secret_key.as_deref(), Some("s3cret"));
        assert_eq!(config.openai_base_url, "http://localhost:9999/v1");
        assert_eq!(config.images_dir, Path::new("/tmp/generated"));
        assert!(!config.save_images);
        Ok(())
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(config_from(&[("OPENAI_API_KEY", "sk"), ("PORT", "http")]).is_err());
    }
}
