//! The configuration structs used to build the AppConfig, and their impls.
use std::{
    collections::{hash_map::Entry, HashMap},
    io::Read,
};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use toml::Value;

use crate::config::{ConfigError, ConfigResult};

/// Environment variable holding the Beehiiv API key.
pub const API_KEY_ENV: &str = "BEEHIIV_API_KEY";
/// Environment variable holding the Beehiiv publication id.
pub const PUBLICATION_ID_ENV: &str = "BEEHIIV_PUBLICATION_ID";

// ###################################
// ->   STRUCTS
// ###################################
/// Accumulates the contents of layered TOML files before the final
/// deserialization into `AppConfig`. Later files override earlier ones
/// key by key.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AppConfigBuilder(HashMap<String, HashMap<String, Value>>);

#[derive(Debug, AsRefStr)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub provider_config: ProviderConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_millis: u64,
    /// Never read from config files, see `load_credentials_from_env`.
    #[serde(skip)]
    pub api_key: Option<SecretString>,
    #[serde(skip)]
    pub publication_id: Option<String>,
}

// ###################################
// ->   IMPLs
// ###################################
impl ProviderConfig {
    /// Pulls `BEEHIIV_API_KEY` and `BEEHIIV_PUBLICATION_ID` from the process
    /// environment. Blank values count as missing.
    pub fn load_credentials_from_env(&mut self) {
        self.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(SecretString::from);
        self.publication_id = std::env::var(PUBLICATION_ID_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
    }

    /// Both credentials, or the first `ConfigError` describing what's missing.
    pub fn credentials(&self) -> ConfigResult<(SecretString, String)> {
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        let publication_id = self
            .publication_id
            .clone()
            .ok_or(ConfigError::MissingPublicationId)?;
        Ok((api_key, publication_id))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

impl AppConfig {
    pub fn init() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

impl AppConfigBuilder {
    /// Extends this `AppConfigBuilder` with the contents of `other` builder.
    fn extend_builder(&mut self, other: Self) {
        for (entry, entry_hm) in other.0 {
            if let Entry::Vacant(e) = self.0.entry(entry.clone()) {
                e.insert(entry_hm);
            } else {
                let target_hm = self.0.get_mut(&entry).expect("Checked above!");
                for (inner_entry, inner_value) in entry_hm {
                    target_hm.insert(inner_entry, inner_value);
                }
            }
        }
    }

    /// Panics if file reading or deserialization goes wrong.
    pub fn add_source_file(mut self, mut file: std::fs::File) -> Self {
        let mut file_content = String::new();

        if let Err(e) = file.read_to_string(&mut file_content) {
            panic!("Fatal Error: Building config: {e}");
        }

        let app_conf_builder: AppConfigBuilder = toml::from_str(&file_content)
            .unwrap_or_else(|e| panic!("Fatal Error: Building config: {e}"));

        self.extend_builder(app_conf_builder);

        self
    }

    pub fn build(self) -> ConfigResult<AppConfig> {
        let serialized = toml::to_string(&self)?;
        let app_config = toml::from_str(&serialized)?;
        Ok(app_config)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
