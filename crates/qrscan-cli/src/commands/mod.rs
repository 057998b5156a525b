pub mod batch;
pub mod config;
pub mod interpret;
pub mod output;
pub mod scan;

use std::path::Path;

use qrscan_core::QrscanConfig;

/// Load configuration from `--config`, else the default file, else defaults.
///
/// Environment overrides are applied last.
pub fn load_config(config_path: Option<&str>, no_enrich: bool) -> anyhow::Result<QrscanConfig> {
    let config = match config_path {
        Some(path) => QrscanConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                QrscanConfig::from_file(&default_path)?
            } else {
                QrscanConfig::default()
            }
        }
    };

    let mut config = config.apply_env();
    if no_enrich {
        config.enrichment.enabled = false;
    }

    Ok(config)
}
