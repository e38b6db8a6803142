use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_derive::{Deserialize, Serialize};

pub static CONFIG: OnceCell<AppConfig> = OnceCell::new();

pub fn get_global_config() -> Result<&'static AppConfig, ConfigError> {
    CONFIG.get_or_try_init(AppConfig::new)
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub storage_path: String,
    pub home_page: String,
    pub login_page: String,
    pub modal_close_delay_ms: u64,
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5678/api".to_string(),
            storage_path: "local_storage.json".to_string(),
            home_page: "index.html".to_string(),
            login_page: "login.html".to_string(),
            modal_close_delay_ms: 2000,
            max_upload_bytes: 4 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = AppConfig::get_config_directory()?;
        let defaults = AppConfig::default();

        let mut config = Config::builder();
        if config_dir.join("config.yml").exists() {
            config = config.add_source(File::from(config_dir.join("config.yml")))
        }

        config = config.add_source(Environment::with_prefix("folio"))
            .set_default("api_url", defaults.api_url)?
            .set_default("storage_path", defaults.storage_path)?
            .set_default("home_page", defaults.home_page)?
            .set_default("login_page", defaults.login_page)?
            .set_default("modal_close_delay_ms", defaults.modal_close_delay_ms)?
            .set_default("max_upload_bytes", defaults.max_upload_bytes)?;

        config.build()?.try_deserialize()
    }

    pub fn modal_close_delay(&self) -> Duration {
        Duration::from_millis(self.modal_close_delay_ms)
    }

    fn get_config_directory() -> Result<PathBuf, ConfigError> {
        let config_dir = match env::var("FOLIO_CONF_DIR") {
            Ok(path) => PathBuf::from(path),
            Err(_) => env::current_dir()
                .map_err(|err| ConfigError::Foreign(Box::new(err)))?,
        };

        fs::create_dir_all(&config_dir)
            .map_err(|err| ConfigError::Foreign(Box::new(err)))?;

        Ok(config_dir)
    }
}
