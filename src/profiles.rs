//! Configuration profile persistence
//!
//! Save/load/list/delete configuration profiles as pretty-printed JSON
//! files, one `<name>.json` per profile, inside a single directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Configuration, QamError, QamResult};

/// Name of the built-in profile, which cannot be deleted
pub const DEFAULT_PROFILE: &str = "Default";

/// Sanitize a configuration name to prevent path traversal.
///
/// Rejects anything with path separators, "..", or empty strings, and only
/// allows alphanumerics, spaces, hyphens and underscores.
fn sanitize_name(name: &str) -> QamResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(QamError::Config("Configuration name cannot be empty".into()));
    }
    if trimmed.contains("..") || trimmed.contains('/') || trimmed.contains('\\') {
        return Err(QamError::Config("Invalid configuration name".into()));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err(QamError::Config(
            "Configuration name contains invalid characters".into(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Directory of saved configuration profiles
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Open (and create if needed) the profile directory
    pub fn open(dir: impl Into<PathBuf>) -> QamResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            QamError::Config(format!("Failed to create configs dir {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn save(&self, config: &Configuration) -> QamResult<()> {
        let name = sanitize_name(&config.name)?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| QamError::Config(format!("Serialization error: {e}")))?;
        fs::write(self.path_for(&name), json)
            .map_err(|e| QamError::Config(format!("Failed to write config '{name}': {e}")))?;
        log::info!("saved configuration '{name}' ({} carrier)", config.carrier);
        Ok(())
    }

    pub fn load(&self, name: &str) -> QamResult<Configuration> {
        let name = sanitize_name(name)?;
        let json = fs::read_to_string(self.path_for(&name))
            .map_err(|e| QamError::Config(format!("Failed to read config '{name}': {e}")))?;
        let config = serde_json::from_str(&json)
            .map_err(|e| QamError::Config(format!("Failed to parse config '{name}': {e}")))?;
        log::debug!("loaded configuration '{name}'");
        Ok(config)
    }

    /// Names of all saved profiles, sorted
    pub fn list(&self) -> QamResult<Vec<String>> {
        let mut names: Vec<String> = fs::read_dir(&self.dir)
            .map_err(|e| QamError::Config(format!("Failed to read configs dir: {e}")))?
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                if path.extension()?.to_str()? == "json" {
                    path.file_stem()?.to_str().map(String::from)
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn delete(&self, name: &str) -> QamResult<()> {
        let name = sanitize_name(name)?;
        if name == DEFAULT_PROFILE {
            return Err(QamError::Config(
                "Cannot delete the Default configuration".into(),
            ));
        }
        let path = self.path_for(&name);
        if !path.exists() {
            return Err(QamError::Config(format!("Configuration '{name}' not found")));
        }
        fs::remove_file(&path)
            .map_err(|e| QamError::Config(format!("Failed to delete config '{name}': {e}")))?;
        log::info!("deleted configuration '{name}'");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_name_rejects_path_traversal() {
        assert!(sanitize_name("../evil").is_err());
        assert!(sanitize_name("foo/bar").is_err());
        assert!(sanitize_name("foo\\bar").is_err());
        assert!(sanitize_name("").is_err());
        assert!(sanitize_name("  ").is_err());
    }

    #[test]
    fn sanitize_name_accepts_valid_names() {
        assert_eq!(sanitize_name("Default").unwrap(), "Default");
        assert_eq!(sanitize_name("Voice 10 kHz").unwrap(), "Voice 10 kHz");
        assert_eq!(sanitize_name("  lab_setup-2 ").unwrap(), "lab_setup-2");
    }

    #[test]
    fn sanitize_name_rejects_special_characters() {
        assert!(sanitize_name("config<>").is_err());
        assert!(sanitize_name("config;drop").is_err());
        assert!(sanitize_name("config|pipe").is_err());
    }
}
