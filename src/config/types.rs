use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;

/// Default path of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Prefix for environment variable overrides, e.g. `RELAYER_METRICS_BIND_ADDRESS`.
/// Nested keys use `__`, e.g. `RELAYER_METRICS_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "RELAYER_METRICS_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: where to serve scrapes and how to log.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1:5183".to_string()
}

/// Extracts a [`ConfigV1`] from an already assembled figment.
pub fn extract_config(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Load config from the YAML file at `path`, with environment overrides on top.
pub fn load_config(path: &str) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract_config(figment)
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
