//! Apptainer command generation
//!
//! Translates a requested operation plus a validated [`ContainerConfig`]
//! into the exact runtime invocation. Commands are built as an argv rather
//! than a shell string; the textual form shown by `--debug` comes from the
//! [`std::fmt::Display`] impl and is never itself executed.

use std::fmt;
use std::path::Path;

use crate::config::ContainerConfig;
use crate::error::{ModelboxError, Result};

/// Name of the container runtime binary
pub const RUNTIME: &str = "apptainer";

/// Fallback command for `run` when the caller gives none, a lightweight
/// smoke test that the container starts at all.
const DEFAULT_CMD: &str = "hostname";

/// The operations the front-end can ask the runtime to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Run,
    /// `load` is accepted as an exact alias on the CLI
    Build,
    Start,
    Stop,
    /// Handled by the list renderer, never by the formatter
    List,
}

impl Operation {
    /// Verb used in the banner printed before the runtime is invoked.
    pub fn banner_verb(&self) -> &'static str {
        match self {
            Operation::Run => "Running",
            Operation::Build => "Building",
            Operation::Start => "Starting",
            Operation::Stop => "Stopping",
            Operation::List => "Listing",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Run => "run",
            Operation::Build => "build",
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::List => "list",
        };
        write!(f, "{name}")
    }
}

/// A runtime invocation as a structured argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RuntimeCommand {
    fn new(args: Vec<String>) -> Self {
        Self {
            program: RUNTIME.to_string(),
            args,
        }
    }
}

impl fmt::Display for RuntimeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Build the runtime command for one operation against one model.
///
/// `run` takes the commands to execute inside the container; the other
/// operations ignore `cmd_args`. Operations that act on an existing image
/// fail fast with `NotFound` before anything is spawned.
pub fn format_command(
    operation: Operation,
    model_name: &str,
    config: &ContainerConfig,
    cmd_args: &[String],
) -> Result<RuntimeCommand> {
    let image = &config.image_file;
    let definition = &config.container_definition;
    let enc_flags = encryption_flags(config);

    let mut args: Vec<String> = Vec::new();
    match operation {
        Operation::Run => {
            image_exists(image)?;
            args.push("exec".to_string());
            args.extend(enc_flags);
            args.push(image.clone());
            if cmd_args.is_empty() {
                args.push(DEFAULT_CMD.to_string());
            } else {
                args.extend(cmd_args.iter().cloned());
            }
        }
        Operation::Build => {
            args.push("build".to_string());
            args.extend(enc_flags);
            args.push(image.clone());
            args.push(definition.clone());
        }
        Operation::Start => {
            image_exists(image)?;
            args.extend(["instance".to_string(), "start".to_string()]);
            args.extend(enc_flags);
            args.push(image.clone());
            args.push(model_name.to_string());
        }
        Operation::Stop => {
            // stop does not use the image, but a missing image still means
            // nothing was ever built to stop
            image_exists(image)?;
            args.extend(["instance".to_string(), "stop".to_string()]);
            args.push(model_name.to_string());
        }
        Operation::List => {
            return Err(ModelboxError::CommandFormat(operation.to_string()));
        }
    }

    Ok(RuntimeCommand::new(args))
}

/// Encryption flags for an encrypted image.
///
/// A configured key selects the passphrase prompt flag and an absent key
/// selects `--pem-path` with the (empty) key path. That looks inverted but
/// matches the behavior existing configs depend on; see DESIGN.md before
/// changing it.
fn encryption_flags(config: &ContainerConfig) -> Vec<String> {
    if !config.encrypted {
        return Vec::new();
    }
    if !config.encryption_key.is_empty() {
        vec!["--passkey".to_string()]
    } else {
        vec!["--pem-path".to_string(), config.encryption_key.clone()]
    }
}

/// Fail fast if the image archive is not on disk.
fn image_exists(image_file: &str) -> Result<()> {
    if !Path::new(image_file).exists() {
        return Err(ModelboxError::NotFound(format!(
            "a container with the name {image_file} could not be found, please run build first"
        )));
    }
    Ok(())
}
