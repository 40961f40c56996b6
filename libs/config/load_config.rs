use std::{io::Write, path::Path};

use crate::Config;

pub fn load(config_path: &str) -> eyre::Result<Config> {
    load_if_exists(config_path)?
        .ok_or_else(|| eyre::eyre!("config path '{config_path}' was not found"))
}

/// `None` when there is no file at `config_path`; a file that cannot be read
/// or parsed is an error.
pub fn load_if_exists(config_path: &str) -> eyre::Result<Option<Config>> {
    let Some(content) = read_file_content_if_exist(config_path)? else {
        return Ok(None);
    };

    let config: Config = toml::from_str(&content)
        .map_err(|e| eyre::eyre!("Invalid config file '{config_path}': {e}"))?;

    Ok(Some(config))
}

fn read_file_content_if_exist(file_path: &str) -> eyre::Result<Option<String>> {
    let path = Path::new(file_path);

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    Ok(Some(content))
}

pub fn save(config_path: &str, config: &Config) -> eyre::Result<()> {
    let toml_string =
        toml::to_string(config).map_err(|e| eyre::eyre!("Failed to serialize config: {e}"))?;

    let path = Path::new(config_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)
        .map_err(|e| eyre::eyre!("Failed to create or truncate file '{config_path}': {e}"))?;

    file.write_all(toml_string.as_bytes())
        .map_err(|e| eyre::eyre!("Failed to write to file '{config_path}': {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoreConfig, ProfileConfig};
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_reported() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nope.toml");

        let err = load(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("was not found"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[profile.default]\nstorage_type = \"in-memory\"\nexcluded_business_names = [\"a\"\n",
        )
        .unwrap();
        let path = path.to_str().unwrap();

        let err = load_if_exists(path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
        assert!(load(path).is_err());

        let missing = temp.path().join("missing.toml");
        assert!(load_if_exists(missing.to_str().unwrap()).unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested/config.toml");
        let path = path.to_str().unwrap();

        let mut config = Config {
            core: CoreConfig {
                identity: Some("owner-1".to_string()),
                default_profile_name: None,
            },
            ..Default::default()
        };
        config.profile.insert(
            "default".to_string(),
            ProfileConfig::default().with_storage_location("/srv/bizdir"),
        );

        save(path, &config).unwrap();
        let loaded = load(path).unwrap();

        assert_eq!(loaded.core.identity.as_deref(), Some("owner-1"));
        assert_eq!(
            loaded.get_profile(None).unwrap().get_storage_location(),
            std::path::PathBuf::from("/srv/bizdir")
        );
    }
}
