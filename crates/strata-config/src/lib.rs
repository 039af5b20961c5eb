//! Configuration for strata tools.
//!
//! Settings persist to disk as a RON file. Every section is `#[serde(default)]`
//! so older and newer files keep loading, and changes can be picked up with
//! [`Config::reload`].

mod config;
mod error;

pub use config::{CONFIG_FILE, Config, DebugConfig, VolumeConfig, default_config_dir};
pub use error::ConfigError;
