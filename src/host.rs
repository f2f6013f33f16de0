//! Loading host data for the command line: a module catalog and a directory
//! of profile files.

use mission_line::{Catalog, ModuleInfo, Profile, ProfileKind, ProfileMap};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid catalog {path}: {source}")]
    Catalog { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    modules: Vec<ModuleInfo>,
}

/// On-disk profile layout.
#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(rename = "DisabledList", default)]
    disabled_list: Vec<String>,
    #[serde(rename = "Operation", default)]
    operation: u8,
}

impl From<ProfileFile> for Profile {
    fn from(file: ProfileFile) -> Self {
        let kind = if file.operation == 1 { ProfileKind::Defuser } else { ProfileKind::Expert };
        Profile { disabled: file.disabled_list.into_iter().collect(), kind }
    }
}

/// The vanilla catalog, extended with the modules listed in `path` if given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, HostError> {
    let Some(path) = path else {
        return Ok(Catalog::vanilla());
    };
    let text = fs::read_to_string(path).map_err(|source| HostError::Io { path: path.to_path_buf(), source })?;
    let catalog = parse_catalog(&text).map_err(|source| HostError::Catalog { path: path.to_path_buf(), source })?;
    log::debug!("[host] catalog {} has {} module(s)", path.display(), catalog.len());
    Ok(catalog)
}

fn parse_catalog(text: &str) -> Result<Catalog, serde_json::Error> {
    let file: CatalogFile = serde_json::from_str(text)?;
    Ok(Catalog::with_modules(file.modules))
}

/// Every `<name>.json` in `dir`, keyed by file stem.
///
/// A missing directory is an error; individual unreadable or malformed files
/// are skipped with a warning.
pub fn load_profiles(dir: Option<&Path>) -> Result<ProfileMap, HostError> {
    let mut profiles = ProfileMap::new();
    let Some(dir) = dir else {
        return Ok(profiles);
    };

    let entries = fs::read_dir(dir).map_err(|source| HostError::Io { path: dir.to_path_buf(), source })?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let parsed = fs::read_to_string(&path)
            .map_err(|err| err.to_string())
            .and_then(|text| parse_profile(&text).map_err(|err| err.to_string()));
        match parsed {
            Ok(profile) => {
                profiles.insert(name.to_string(), profile);
            }
            Err(err) => log::warn!("[host] skipping profile {}: {}", path.display(), err),
        }
    }

    log::debug!("[host] loaded {} profile(s) from {}", profiles.len(), dir.display());
    Ok(profiles)
}

fn parse_profile(text: &str) -> Result<Profile, serde_json::Error> {
    serde_json::from_str::<ProfileFile>(text).map(Profile::from)
}
