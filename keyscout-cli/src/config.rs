//! Node configuration lookup.
//!
//! Only one setting matters to this tool: the network name under
//! `[network] name` in the shoestring INI file.

use anyhow::{Context, Result};
use ini::Ini;
use log::warn;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_NETWORK: &str = "testnet";

fn candidate_config_paths(config_path: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![config_path.to_path_buf()];
    // A node checked out next to its shoestring directory keeps the INI one
    // level above the working directory.
    if let Some(parent) = env::current_dir()
        .ok()
        .and_then(|dir| dir.parent().map(Path::to_path_buf))
    {
        candidates.push(parent.join("shoestring").join("shoestring.ini"));
    }
    candidates
}

/// Read the configured network name, trying the given path first.
///
/// Errors only when a present file cannot be parsed; a missing file is
/// handled by the caller falling back to [`DEFAULT_NETWORK`].
pub fn network_name(config_path: &Path) -> Result<String> {
    for path in candidate_config_paths(config_path) {
        if !path.exists() {
            continue;
        }
        let conf = Ini::load_from_file(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = conf
            .section(Some("network"))
            .and_then(|section| section.get("name"))
            .unwrap_or(DEFAULT_NETWORK);
        return Ok(name.to_string());
    }
    warn!("no shoestring.ini found; using the '{DEFAULT_NETWORK}' network");
    Ok(DEFAULT_NETWORK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_network_name_from_ini() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shoestring.ini");
        fs::write(&path, "[network]\nname = mainnet\n").unwrap();
        assert_eq!(network_name(&path).unwrap(), "mainnet");
    }

    #[test]
    fn missing_name_key_falls_back_to_testnet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shoestring.ini");
        fs::write(&path, "[network]\nidentifier = 152\n").unwrap();
        assert_eq!(network_name(&path).unwrap(), DEFAULT_NETWORK);
    }

    #[test]
    fn missing_file_falls_back_to_testnet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.ini");
        assert_eq!(network_name(&path).unwrap(), DEFAULT_NETWORK);
    }
}
