//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup pipeline.

pub mod inspect;
pub mod run;
pub mod setup;

pub use inspect::handle_inspect_command;
pub use run::{handle_check_command, handle_run_command, ConfigArgs, RunArgs};
pub use setup::{handle_config_command, handle_init_command};
