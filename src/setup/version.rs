//! Config file versioning.
//!
//! The first line of the config file records which release wrote it:
//! `config_version = "X.Y.Z"`. A file written by an older release (or with no
//! stamp at all) is replaced by the current defaults on startup.

use anyhow::anyhow;
use regex::Regex;
use std::fmt;
use std::path::Path;

/// Current application version from Cargo.toml
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A `major.minor.patch` release number.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct ConfigVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl ConfigVersion {
    /// Parses `"X.Y.Z"`.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let regex = Regex::new(r"^(\d+)\.(\d+)\.(\d+)$")?;
        let caps = regex
            .captures(text.trim())
            .ok_or_else(|| anyhow!("Invalid version '{}'. Expected 'major.minor.patch'", text))?;
        let part = |i: usize| {
            caps[i]
                .parse::<u32>()
                .map_err(|_| anyhow!("Version component '{}' is out of range", &caps[i]))
        };
        Ok(Self {
            major: part(1)?,
            minor: part(2)?,
            patch: part(3)?,
        })
    }

    pub fn current() -> anyhow::Result<Self> {
        Self::parse(CURRENT_VERSION)
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// What startup has to do with the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAction {
    /// No config file yet
    Install,
    /// Config written by an older release, or unstamped
    Upgrade { from: Option<ConfigVersion> },
    /// Config matches this release (or a newer one)
    UpToDate,
}

/// Reads the `config_version` stamp from the first line of `content`.
pub fn read_stamp(content: &str) -> anyhow::Result<Option<ConfigVersion>> {
    let regex = Regex::new(r#"^\s*config_version\s*=\s*"([^"]+)""#)?;
    let first_line = content.lines().next().unwrap_or_default();
    match regex.captures(first_line) {
        Some(caps) => Ok(Some(ConfigVersion::parse(&caps[1])?)),
        None => Ok(None),
    }
}

/// Decides the setup action for the config file at `config_path`.
///
/// # Errors
/// - If the file exists but cannot be read
/// - If the stamp is present but malformed
pub fn check_setup_needed(config_path: &Path) -> anyhow::Result<SetupAction> {
    if !config_path.exists() {
        return Ok(SetupAction::Install);
    }

    let content = std::fs::read_to_string(config_path)?;
    let current = ConfigVersion::current()?;
    match read_stamp(&content)? {
        None => Ok(SetupAction::Upgrade { from: None }),
        Some(found) if found < current => Ok(SetupAction::Upgrade { from: Some(found) }),
        Some(found) => {
            if found > current {
                tracing::warn!(
                    "Config version {} is newer than app version {}",
                    found,
                    current
                );
            }
            Ok(SetupAction::UpToDate)
        }
    }
}

/// Prefixes `body` with the current version stamp, dropping any old stamp.
pub fn stamp(body: &str) -> String {
    let rest: Vec<&str> = body
        .lines()
        .filter(|line| !line.trim_start().starts_with("config_version"))
        .collect();
    format!("config_version = \"{}\"\n{}\n", CURRENT_VERSION, rest.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_order() {
        let old = ConfigVersion::parse("0.0.9").unwrap();
        let new = ConfigVersion::parse("0.1.0").unwrap();
        assert!(old < new);
        assert_eq!(new.to_string(), "0.1.0");
        assert!(ConfigVersion::parse("0.1").is_err());
        assert!(ConfigVersion::parse("0.1.0.2").is_err());
        assert!(ConfigVersion::parse("one.two.three").is_err());
    }

    #[test]
    fn test_read_stamp() {
        let content = "config_version = \"0.0.3\"\n[grid]\n";
        assert_eq!(read_stamp(content).unwrap(), Some(ConfigVersion::parse("0.0.3").unwrap()));
        assert_eq!(read_stamp("# config_version = \"0.0.3\"\n").unwrap(), None);
        assert_eq!(read_stamp("").unwrap(), None);
    }

    #[test]
    fn test_stamp_replaces_existing_line() {
        let stamped = stamp("config_version = \"0.0.1\"\n[grid]\nfull_n = 64");
        let mut lines = stamped.lines();
        assert_eq!(lines.next(), Some(format!("config_version = \"{CURRENT_VERSION}\"").as_str()));
        assert_eq!(stamped.matches("config_version").count(), 1);
        assert!(stamped.contains("full_n = 64"));
    }

    #[test]
    fn test_check_setup_needed() {
        let dir = std::env::temp_dir().join(format!("fourierpaint-version-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fourierpaint.toml");
        let _ = std::fs::remove_file(&path);

        assert_eq!(check_setup_needed(&path).unwrap(), SetupAction::Install);

        std::fs::write(&path, "[grid]\n").unwrap();
        assert_eq!(check_setup_needed(&path).unwrap(), SetupAction::Upgrade { from: None });

        std::fs::write(&path, "config_version = \"0.0.0\"\n").unwrap();
        assert!(matches!(
            check_setup_needed(&path).unwrap(),
            SetupAction::Upgrade { from: Some(_) }
        ));

        std::fs::write(&path, stamp("[grid]")).unwrap();
        assert_eq!(check_setup_needed(&path).unwrap(), SetupAction::UpToDate);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
