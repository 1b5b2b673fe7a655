//! Check command implementation
//!
//! Validates the effective configuration and reports the settings a sweep
//! would run with.

use std::path::Path;

use tracing::{error, info};

use crate::config::SweepConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &SweepConfig, config_path: &Path) -> Result<()> {
    info!("Checking configuration...");
    if config_path.exists() {
        info!("  Config file: {}", config_path.display());
    } else {
        info!("  Config file: {} (not found, using defaults)", config_path.display());
    }

    info!("  tenure:             {} months", config.tenure);
    info!("  lock_in_period:     {} months", config.lock_in_period);
    info!("  upper_ratio:        {}", config.upper_ratio);
    info!("  lower_ratio:        {}", config.lower_ratio);
    info!("  parallel_threshold: {} rows", config.parallel_threshold);
    info!("  columns:            {}, {}", config.date_column, config.price_column);
    info!("  log_level:          {}", config.log_level);

    if let Err(e) = config.validate() {
        error!("Configuration invalid: {}", e);
        return Err(e.into());
    }

    let terms = config.contract_terms()?;
    info!("  observations:       {}", terms.observation_count());
    info!("Configuration OK");
    Ok(())
}
