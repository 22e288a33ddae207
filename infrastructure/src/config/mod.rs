//! Configuration file loading for llm-plus
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LLM_PLUS_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./llm-plus.toml` or `./.llm-plus.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/llm-plus/config.toml`
//! 5. Fallback: `~/.config/llm-plus/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConsensusConfig, FileDispatchConfig,
    FileEndpointConfig, FileEndpointsConfig, FileOutputConfig, FileOutputFormat,
    FileProviderConfig,
};
pub use loader::ConfigLoader;
