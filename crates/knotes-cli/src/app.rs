use std::sync::Arc;

use knotes_core::{ConfidentialityEngine, EngineConfig};

use crate::cli::Cli;
use crate::config::{load_config, KnotesConfig};
use crate::errors::CliError;

/// Shared state for a single CLI invocation.
pub struct AppContext {
    pub config: KnotesConfig,
    pub quiet: bool,
}

impl AppContext {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config = load_config(cli.config.as_deref())
            .map_err(|e| CliError::Configuration(e.to_string()))?;
        Ok(Self {
            config,
            quiet: cli.quiet,
        })
    }

    /// Build the engine from `KNOTES_ENCRYPTION_KEY` and the configured
    /// iteration count. Fails before any note is touched.
    pub fn engine(&self) -> anyhow::Result<ConfidentialityEngine> {
        let config = EngineConfig::from_env()
            .and_then(|config| config.with_kdf_iterations(self.config.kdf.iterations))
            .map_err(CliError::from)?;
        Ok(ConfidentialityEngine::new(Arc::new(config)))
    }
}
