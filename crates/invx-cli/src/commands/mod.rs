//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use invx_core::InvxConfig;

/// Load the configuration named on the command line, else the user's config
/// file if one exists, else the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvxConfig> {
    if let Some(path) = config_path {
        return Ok(InvxConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(InvxConfig::from_file(&default_path)?)
    } else {
        Ok(InvxConfig::default())
    }
}

/// File name used when reporting a document.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
