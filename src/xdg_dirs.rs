//! XDG Base Directory Specification support
//!
//! Directory structure:
//! - Config: $XDG_CONFIG_HOME/confedit (default: ~/.config/confedit)
//! - Data: $XDG_DATA_HOME/confedit (default: ~/.local/share/confedit)

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the configuration directory
///
/// Returns `$XDG_CONFIG_HOME/confedit` or `~/.config/confedit` on Linux/macOS
pub fn get_config_dir() -> Result<PathBuf> {
    let base_dir = dirs::config_dir().context("Could not find config directory")?;
    Ok(base_dir.join("confedit"))
}

/// Get the data directory
///
/// Returns `$XDG_DATA_HOME/confedit` or `~/.local/share/confedit` on Linux/macOS
///
/// Used for: log files
pub fn get_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Could not find data directory")?;
    Ok(base_dir.join("confedit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_dir() {
        let dir = get_config_dir().expect("Failed to get config dir");
        assert!(dir.to_string_lossy().contains("confedit"));
    }

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir().expect("Failed to get data dir");
        assert!(dir.to_string_lossy().contains("confedit"));
    }
}
