pub mod config;
pub mod load_config;

pub use config::{Config, CoreConfig, ProfileConfig};
pub use load_config::{load, load_if_exists, save};
