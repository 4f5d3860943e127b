//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modelbox")]
#[command(author, version, about = "Define and run named model containers with Apptainer", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Path to a config file, or a directory of *.yaml config files
    #[arg(
        long = "config_file",
        global = true,
        env = "MODELBOX_CONFIG_FILE",
        default_value = "Container_Configs/"
    )]
    pub config_file: PathBuf,

    /// Print the generated Apptainer command instead of running it,
    /// useful for sanity checking
    #[arg(long, global = true)]
    pub debug: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Run command(s) with the container
    Run {
        /// Name of the model to use
        model_name: String,

        /// Command(s) to run inside the container; use `--` before
        /// commands that take flags of their own
        #[arg(required = true, num_args = 1..)]
        cmd: Vec<String>,
    },

    /// Build the container, exactly equivalent to load
    Build {
        /// Name of the model to use
        model_name: String,
    },

    /// Build the container, exactly equivalent to build
    Load {
        /// Name of the model to use
        model_name: String,
    },

    /// Start the container as a background instance
    Start {
        /// Name of the model to use
        model_name: String,
    },

    /// Stop a container running in the background
    Stop {
        /// Name of the model to use
        model_name: String,
    },

    /// List available containers
    List {
        /// Optional group of containers to list
        #[arg(long, default_value = "")]
        group: String,

        /// Output the listing as JSON
        #[arg(long)]
        json: bool,
    },
}
