//! First-run setup.
//!
//! Writes the default config file when none exists, and replaces configs
//! written by older releases (keeping a `.bak` copy of the old file).

pub mod version;

use anyhow::anyhow;
use std::path::Path;
use version::SetupAction;

/// Embedded default configuration template.
pub const DEFAULT_CONFIG: &str = include_str!("../../environments/fourierpaint.toml");

/// Brings the config file at `config_path` up to date with this release.
///
/// # Errors
/// Returns an error if the version check or any file operation fails.
pub fn ensure_config(config_path: &Path) -> anyhow::Result<()> {
    match version::check_setup_needed(config_path)? {
        SetupAction::Install => {
            tracing::info!("No config found, writing defaults to {}", config_path.display());
            write_default(config_path)?;
        }
        SetupAction::Upgrade { from } => {
            let from = from.map_or_else(|| "unknown (unstamped)".to_string(), |v| v.to_string());
            let backup = config_path.with_extension("toml.bak");
            std::fs::copy(config_path, &backup)
                .map_err(|e| anyhow!("Failed to back up {}: {e}", config_path.display()))?;
            write_default(config_path)?;
            tracing::info!(
                "Config migrated from version {} to {} (previous file kept at {})",
                from,
                version::CURRENT_VERSION,
                backup.display()
            );
        }
        SetupAction::UpToDate => {
            tracing::debug!("Config version up to date ({})", version::CURRENT_VERSION);
        }
    }
    Ok(())
}

fn write_default(config_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, version::stamp(DEFAULT_CONFIG))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaintConfig;

    #[test]
    fn test_install_then_upgrade() {
        let dir = std::env::temp_dir().join(format!("fourierpaint-setup-{}", std::process::id()));
        let path = dir.join("fourierpaint.toml");
        let _ = std::fs::remove_dir_all(&dir);

        ensure_config(&path).unwrap();
        let installed = PaintConfig::load_from(&path).unwrap();
        assert_eq!(installed, PaintConfig::default());

        std::fs::write(&path, "[grid]\nfull_n = 64\n").unwrap();
        ensure_config(&path).unwrap();
        assert_eq!(PaintConfig::load_from(&path).unwrap(), PaintConfig::default());
        let backup = std::fs::read_to_string(path.with_extension("toml.bak")).unwrap();
        assert!(backup.contains("full_n = 64"));

        // Up to date: user edits survive.
        let edited = version::stamp("[grid]\nfull_n = 128");
        std::fs::write(&path, &edited).unwrap();
        ensure_config(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), edited);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
