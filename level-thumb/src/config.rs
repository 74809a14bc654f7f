use anyhow::{Context, Result};
use derive_setters::Setters;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const CONFIG_ENV: &str = "LEVEL_THUMB_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct Config {
    #[derivative(Default(value = "\"0.0.0.0:3000\".to_string()"))]
    pub listen_addr: String,

    #[derivative(Default(value = "PathBuf::from(\"assets\")"))]
    pub assets_dir: PathBuf,

    #[derivative(Default(value = "\"/api/level\".to_string()"))]
    pub route: String,

    // seconds, unset means wait for the remote indefinitely
    #[setters(strip_option)]
    pub fetch_timeout_secs: Option<u64>,
}

impl Config {
    /// Loads the configuration file at `path`.
    ///
    /// A missing file is not an error, the defaults are used instead. A file
    /// that exists but does not parse is.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(text) => {
                let config = toml::from_str::<Config>(&text)
                    .with_context(|| format!("parse config file {} failed", path.display()))?;
                info!("loaded config from {}", path.display());
                debug!("{config:?}");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("config file {} not found, using defaults", path.display());
                Ok(Config::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("read config file {} failed", path.display()))
            }
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.route, "/api/level");
        assert_eq!(config.fetch_timeout(), None);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::load(dir.path().join("nope.toml"))?;

        assert_eq!(config.listen_addr, Config::default().listen_addr);
        Ok(())
    }

    #[test]
    fn test_load_partial_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "listen_addr = \"127.0.0.1:8080\"")?;
        writeln!(file, "fetch_timeout_secs = 15")?;

        let config = Config::load(file.path())?;

        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.route, "/api/level");
        Ok(())
    }

    #[test]
    fn test_load_invalid_file_fails() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "listen_addr = [")?;

        assert!(Config::load(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_setters() {
        let config = Config::default()
            .with_assets_dir(PathBuf::from("/srv/assets"))
            .with_fetch_timeout_secs(3);

        assert_eq!(config.assets_dir, PathBuf::from("/srv/assets"));
        assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(3)));
    }
}
