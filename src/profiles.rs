//! Connection profiles: load/save simple JSON mapping of profile name -> { port, baud }
//! Stored under XDG config dir: $XDG_CONFIG_HOME/statline/profiles.json (fallback ~/.config/statline/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::session::DEFAULT_BAUD;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub port: String,
    #[serde(default = "default_baud")]
    pub baud: u32,
}

fn default_baud() -> u32 {
    DEFAULT_BAUD
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("statline")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("statline")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).expect("serialize profiles");
    fs::write(path, data)
}

pub enum ResolveProfile {
    /// Use the provided runtime inputs (not persisted here). (port, baud)
    Direct(Option<String>, u32),
    /// Loaded from an existing profile entry. (port, baud)
    Loaded(String, u32),
    /// Named profile does not exist and no port was given.
    Unknown(String),
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub port: Option<String>,
    pub baud: Option<u32>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        // Case: only profile name given -> try load
        if self.port.is_none() {
            if let Some(name) = self.profile_name {
                return match pf.profiles.get(&name) {
                    Some(entry) => {
                        ResolveProfile::Loaded(entry.port.clone(), self.baud.unwrap_or(entry.baud))
                    }
                    None => ResolveProfile::Unknown(name),
                };
            }
        }
        // Anything else is direct; an explicit --baud always wins.
        ResolveProfile::Direct(self.port, self.baud.unwrap_or(DEFAULT_BAUD))
    }
}
