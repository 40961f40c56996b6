use std::str::FromStr;

use bizdir_config::ProfileConfig;
use inflector::cases::pascalcase::to_pascal_case;
use strum_macros::{Display, EnumString};

pub use bizdir_storage_core::*;

pub mod document_parser;

pub mod storage {
    pub mod file;
    pub mod in_memory;
}

pub(crate) mod utils {
    pub(crate) mod files;
}

use storage::{file::FileStorageConfig, in_memory::InMemoryStorageConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
pub enum BuiltinStorageType {
    File,
    InMemory,
}

impl BuiltinStorageType {
    /// Accepts `file`, `in-memory` or `in_memory`
    pub fn try_from_str_lowercase(s: &str) -> eyre::Result<Self> {
        Self::from_str(&to_pascal_case(s)).map_err(|_| {
            eyre::eyre!("Invalid storage type '{s}', please select one of `file`, `in-memory`")
        })
    }
}

/// Build the storage described by a profile, the file storage is used when no
/// storage type is given.
pub fn load_storage(profile: &ProfileConfig) -> eyre::Result<StorageBox> {
    let storage_type = profile
        .storage_type
        .as_deref()
        .map(BuiltinStorageType::try_from_str_lowercase)
        .unwrap_or(Ok(BuiltinStorageType::File))?;

    tracing::debug!(%storage_type, "Loading storage");

    match storage_type {
        BuiltinStorageType::File => FileStorageConfig {
            storage_location: Some(profile.get_storage_location()),
            file_format: profile.file_format.clone(),
        }
        .try_into_storage(),
        BuiltinStorageType::InMemory => InMemoryStorageConfig::default().try_into_storage(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_storage_type() {
        assert_eq!(
            BuiltinStorageType::try_from_str_lowercase("file").unwrap(),
            BuiltinStorageType::File
        );
        assert_eq!(
            BuiltinStorageType::try_from_str_lowercase("in-memory").unwrap(),
            BuiltinStorageType::InMemory
        );
        assert_eq!(
            BuiltinStorageType::try_from_str_lowercase("in_memory").unwrap(),
            BuiltinStorageType::InMemory
        );
        assert!(BuiltinStorageType::try_from_str_lowercase("git").is_err());
    }

    #[test]
    fn load_in_memory_storage_from_profile() {
        let profile: ProfileConfig = toml::from_str(r#"storage_type = "in-memory""#).unwrap();
        let storage = load_storage(&profile).unwrap();

        assert!(storage.supports_batch());
        assert_eq!(storage.debug_message(), "In memory storage");
    }
}
