//! Modelbox CLI - define and run named model containers with Apptainer

use anyhow::Context;
use clap::Parser;
use modelbox::cli::{Args, SubCommand};
use modelbox::{command, config, output, Operation};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

/// Diagnostics go to stderr via tracing so stdout stays clean for the
/// banner/list output. `RUST_LOG` overrides the flag-derived level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<i32> {
    banner("Loading Model Config Files");
    let containers = config::load(&args.config_file)
        .with_context(|| format!("failed to load configs from {}", args.config_file.display()))?;
    println!("All config files look OK");

    let (operation, model_name, cmd_args) = match &args.command {
        SubCommand::List { group, json } => {
            let listing = if *json {
                output::render_json(&containers, group)?
            } else {
                output::render_human(&containers, group)
            };
            print!("{listing}");
            return Ok(0);
        }
        SubCommand::Run { model_name, cmd } => (Operation::Run, model_name, cmd.clone()),
        SubCommand::Build { model_name } | SubCommand::Load { model_name } => {
            (Operation::Build, model_name, Vec::new())
        }
        SubCommand::Start { model_name } => (Operation::Start, model_name, Vec::new()),
        SubCommand::Stop { model_name } => (Operation::Stop, model_name, Vec::new()),
    };

    let config = containers
        .get(model_name)
        .ok_or_else(|| modelbox::ModelboxError::UnknownModel {
            name: model_name.clone(),
            known: containers.keys().cloned().collect(),
        })?;

    let runtime_command = command::format_command(operation, model_name, config, &cmd_args)?;
    banner(&format!("{}: {}", operation.banner_verb(), model_name));

    if args.debug {
        println!("Debug enabled");
        println!("current config will run the following command:");
        println!("{runtime_command}");
        return Ok(0);
    }

    let code = command::execute(&runtime_command)?;
    if code != 0 {
        eprintln!("An error occurred. Container exited with the exit code {code}");
    }
    // the wrapper's exit code mirrors the runtime's
    Ok(code)
}

fn banner(message: &str) {
    println!("*********************************************************************");
    println!("***************** {message} *********************");
    println!("*********************************************************************");
}
