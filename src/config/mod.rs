mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::{Path, PathBuf};

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_sec: default_timeout_sec(),
            review_limit: default_review_limit(),
            rclone_remote: None,
            template_hub_id: None,
            template_cover_id: None,
            template_review_id: None,
        }
    }
}

impl Config {
    /// `~/.tess/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home
            .join(default_config_dir_name())
            .join(default_config_file_name()))
    }

    /// Resolve an explicit `--config` path or fall back to the default location
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load config from a TOML file without validating it
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadFile {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config.normalized())
    }

    /// Load and validate config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate(path)?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(path.to_path_buf()));
        }
        Ok(())
    }

    /// Write the config as TOML, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = toml::to_string(&self.clone().normalized())?;
        std::fs::write(path, content).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        Ok(())
    }

    /// rclone remote: explicit CLI value, then config, then "drive"
    pub fn remote_name(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .or_else(|| self.rclone_remote.clone())
            .unwrap_or_else(default_rclone_remote)
    }

    /// Blank optional values are treated as unset
    fn normalized(mut self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        self.rclone_remote = clean(self.rclone_remote);
        self.template_hub_id = clean(self.template_hub_id);
        self.template_cover_id = clean(self.template_cover_id);
        self.template_review_id = clean(self.template_review_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = \"abc123\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_sec, 15);
        assert_eq!(config.review_limit, 100);
        assert!(config.rclone_remote.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = \"   \"\nrclone_remote = \"gdrive\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn test_blank_optionals_are_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_key = \"k\"\nrclone_remote = \"  \"\ntemplate_hub_id = \" abc \"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.rclone_remote.is_none());
        assert_eq!(config.template_hub_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            api_key: "Bearer xyz".to_string(),
            rclone_remote: Some("work".to_string()),
            template_cover_id: Some("cover-1".to_string()),
            ..Config::default()
        };

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded.api_key, "Bearer xyz");
        assert_eq!(loaded.rclone_remote.as_deref(), Some("work"));
        assert_eq!(loaded.template_cover_id.as_deref(), Some("cover-1"));
        assert!(loaded.template_hub_id.is_none());
    }

    #[test]
    fn test_remote_name_precedence() {
        let mut config = Config::default();
        assert_eq!(config.remote_name(None), "drive");

        config.rclone_remote = Some("team".to_string());
        assert_eq!(config.remote_name(None), "team");
        assert_eq!(config.remote_name(Some("mine")), "mine");
        assert_eq!(config.remote_name(Some("  ")), "team");
    }
}
