use bizdir_core::LoadOptions;
use clap::Parser;
use directories_next::ProjectDirs;
use std::path::PathBuf;
use utils::{command_error, exit_code::ExitCode};

mod commands;
mod tracing;

mod utils {
    pub mod command_error;
    pub mod display;
    pub mod exit_code;
    pub mod time;
}

// Note: for uniformity, we dont use clap `default_value` or `default_value_t` options
#[derive(Parser, Debug)]
#[command(
    name = "bizdir",
    version,
    long_about = Some("Browse the local business directory, manage your businesses and their tasks.")
)]
struct Args {
    /// Path of configuration file (default: "~/.config/bizdir/config.toml")
    #[arg(short, long)]
    config: Option<String>,

    /// Profile to use
    #[arg(long)]
    profile: Option<String>,

    /// Act as this identity instead of the configured one
    #[arg(long = "as", value_name = "IDENTITY")]
    identity: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: commands::Command,
}

impl Args {
    fn get_config_path(&self) -> eyre::Result<String> {
        let config_path = match &self.config {
            Some(x) => Ok(x.clone()),
            None => match ProjectDirs::from("", "", "bizdir") {
                Some(proj_dirs) => {
                    let config_path: PathBuf = proj_dirs.config_dir().join("config.toml");
                    config_path
                        .to_str()
                        .map(|t| t.to_owned())
                        .ok_or_else(|| eyre::eyre!("couldn't convert os path to string"))
                }
                None => Err(eyre::eyre!("Project directories could not be found.")),
            },
        }?;

        Ok(shellexpand::full(&config_path)?.into_owned())
    }
}

async fn run(args: Args) -> command_error::Result<()> {
    let config_path = args
        .get_config_path()
        .map_err(|e| command_error::Error::ExitWithError(ExitCode::ConfigError, e))?;

    let core = bizdir_core::load(
        LoadOptions::builder()
            .config_path(config_path.clone())
            .profile_name(args.profile)
            .identity(args.identity)
            .build(),
    )
    .await
    .map_err(|e| {
        command_error::Error::ExitWithError(
            ExitCode::ConfigError,
            e.wrap_err(format!("Failed to load the configuration '{config_path}'")),
        )
    })?;

    if let Err(e) = core.has_found_config_file() {
        ::tracing::info!("No configuration file: {e}");
    }
    core.initialize().await?;

    args.command.execute(&core).await
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = color_eyre::install().and_then(|_| tracing::setup()) {
        eprintln!("{e:?}");
        return ExitCode::Software;
    }

    match run(Args::parse()).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:?}", e.report());
            *e.code()
        }
    }
}
