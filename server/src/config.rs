//! # Config
//!
//! Define and implement config options for module

use anyhow::Result;
use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;

use crate::network::demo::DEMO_NODE_COUNT;

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// path to log configuration YAML file
    pub log_config: String,

    /// number of servers in the demo network
    pub demo_node_count: u32,

    /// routes at or above this latency are flagged as high latency
    pub latency_alert_threshold_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            log_config: String::from("log4rs.yaml"),
            demo_node_count: DEMO_NODE_COUNT as u32,
            latency_alert_threshold_ms: 50,
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        config::Config::builder()
            .set_default("log_config", default_config.log_config)?
            .set_default("demo_node_count", default_config.demo_node_count)?
            .set_default(
                "latency_alert_threshold_ms",
                default_config.latency_alert_threshold_ms,
            )?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}
