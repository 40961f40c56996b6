use bizdir_config::Config;
use bizdir_storage::StorageBox;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

use crate::{
    entities::{AuthBox, Identity, StaticAuth},
    Core,
};

#[derive(Debug, Default, TypedBuilder)]
pub struct LoadOptions {
    #[builder(setter(into))]
    pub config_path: String,
    #[builder(default, setter(into))]
    pub profile_name: Option<String>,
    /// Takes precedence over the identity of the configuration file
    #[builder(default, setter(into))]
    pub identity: Option<String>,
}

/// Load the configuration then the storage of the selected profile. A missing
/// configuration file is not an error, defaults are used instead. A file that
/// exists but cannot be read or parsed is.
pub async fn load(options: LoadOptions) -> eyre::Result<Core> {
    let mut found_config_file = Ok(());
    let config = match bizdir_config::load_if_exists(&options.config_path)? {
        Some(config) => config,
        None => {
            warn!(path = %options.config_path, "No config file, using default configuration");
            found_config_file = Err(eyre::eyre!(
                "config path '{}' was not found",
                options.config_path
            ));
            Config::default()
        }
    };

    let profile = config.get_profile(options.profile_name.as_deref())?;
    let storage = bizdir_storage::load_storage(&profile)?;
    debug!(storage = storage.debug_message(), "Storage loaded");

    let identity = options
        .identity
        .or_else(|| config.core.identity.clone())
        .filter(|id| !id.trim().is_empty())
        .map(Identity::new);

    let mut core = load_core(
        storage,
        AuthBox::new(StaticAuth::new(identity)),
        profile.excluded_business_names,
    );
    core.found_config_file = found_config_file;
    Ok(core)
}

/// Build a core from already constructed collaborators
pub fn load_core(storage: StorageBox, auth: AuthBox, excluded_names: Vec<String>) -> Core {
    Core {
        storage,
        auth,
        excluded_names,
        found_config_file: Ok(()),
    }
}
