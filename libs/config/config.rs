use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_PROFILE_NAME: &str = "default";
pub const DEFAULT_STORAGE_LOCATION: &str = "~/.local/share/bizdir";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default)]
    pub profile: HashMap<String, ProfileConfig>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct CoreConfig {
    /// Identity of the signed-in user, absent when browsing anonymously
    pub identity: Option<String>,

    /// Profile used by default when none are specified
    pub default_profile_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ProfileConfig {
    /// Type of storage backend (`file` or `in-memory`, default: file)
    pub storage_type: Option<String>,

    /// Where documents will be located (default: ~/.local/share/bizdir/)
    storage_location: Option<String>,

    /// Document file format for the file storage (`json`, `toml` or `yaml`)
    pub file_format: Option<String>,

    /// Business names hidden from every directory listing
    #[serde(default)]
    pub excluded_business_names: Vec<String>,
}

impl Config {
    /// Gets a profile by name, or the default profile when `name` is `None`.
    ///
    /// A config with no profile at all behaves as if the default profile was
    /// declared empty.
    pub fn get_profile(&self, name: Option<&str>) -> eyre::Result<ProfileConfig> {
        let profile_name = name
            .map(str::to_owned)
            .unwrap_or_else(|| self.core.get_default_profile_name());

        match self.profile.get(&profile_name) {
            Some(profile) => Ok(profile.clone()),
            None if self.profile.is_empty() && profile_name == DEFAULT_PROFILE_NAME => {
                Ok(ProfileConfig::default())
            }
            None => Err(eyre::eyre!("Profile '{profile_name}' not found in config")),
        }
    }
}

impl ProfileConfig {
    pub fn with_storage_location(mut self, location: impl Into<String>) -> Self {
        self.storage_location = Some(location.into());
        self
    }

    /// Gets the storage location for this profile, with `~` expanded.
    pub fn get_storage_location(&self) -> PathBuf {
        let path_str = self
            .storage_location
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_LOCATION);
        let expanded_path = shellexpand::tilde(path_str);
        PathBuf::from(expanded_path.as_ref())
    }
}

impl CoreConfig {
    /// Return the default profile name is set or "default"
    pub fn get_default_profile_name(&self) -> String {
        self.default_profile_name
            .clone()
            .unwrap_or(DEFAULT_PROFILE_NAME.to_owned())
    }
}
