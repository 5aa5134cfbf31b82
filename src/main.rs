use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bundle_backup::cli::{
    handle_check_command, handle_config_command, handle_init_command, handle_inspect_command,
    handle_run_command, ConfigArgs, RunArgs,
};
use bundle_backup::config::{paths::CONFIG_DIR_ENV, BackupPaths, Settings};
use bundle_backup::BackupError;

#[derive(Parser)]
#[command(
    name = "bundle-backup",
    version,
    about = "Zip a list of folders into one dated backup bundle",
    long_about = "bundle-backup archives every folder listed in folders.txt, gathers \
                  the archives into a single bundle, zips the bundle and gives it a \
                  timestamped name. If move_to.txt names a destination, it offers \
                  to move the finished bundle there."
)]
struct Cli {
    /// Directory holding folders.txt, move_to.txt and config.json
    #[arg(long, global = true, env = CONFIG_DIR_ENV)]
    config_dir: Option<PathBuf>,

    /// Show per-file progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backup (the default)
    Run(RunArgs),

    /// Validate the configuration without writing anything
    Check(ConfigArgs),

    /// Create the config directory and empty configuration files
    Init,

    /// Show current configuration and paths
    Config,

    /// List the contents of a backup archive
    Inspect {
        /// Path to the archive
        archive: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BackupPaths::resolve(cli.config_dir.as_deref())?;
    let settings = Settings::load_or_create(&paths)?;

    let level = if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    bundle_backup::logging::init(level)?;

    let result = match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => handle_run_command(&paths, &settings, args),
        Commands::Check(args) => handle_check_command(&paths, &settings, args),
        Commands::Init => handle_init_command(&paths, &settings),
        Commands::Config => handle_config_command(&paths, &settings),
        Commands::Inspect { archive } => handle_inspect_command(&archive),
    };

    match result {
        Err(BackupError::BundleAlreadyExists { path }) => {
            eprintln!(
                "The backup folder '{}' exists. Please delete it and re-run the program.",
                path.display()
            );
            std::process::exit(1);
        }
        other => Ok(other?),
    }
}
