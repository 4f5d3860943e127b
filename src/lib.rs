//! Modelbox - a CLI front-end for named model containers
//!
//! Modelbox reads named container definitions from YAML config files,
//! validates them against a strict schema, and generates the matching
//! Apptainer invocation for each operation (run, build, start, stop, list).
//! The container runtime itself is an external collaborator; Modelbox only
//! decides what to ask it to do.
//!
//! # Example
//!
//! ```no_run
//! use modelbox::{load, format_command, Operation};
//!
//! let containers = load(std::path::Path::new("Container_Configs/")).unwrap();
//! let config = &containers["Example_Model1"];
//! let cmd = format_command(Operation::Run, "Example_Model1", config, &["hostname".into()]).unwrap();
//! println!("{cmd}");
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod uri;

pub use command::{execute, format_command, Operation, RuntimeCommand, RUNTIME};
pub use config::{is_valid_name, load, ContainerConfig, ContainerMap};
pub use error::{ModelboxError, Result};
pub use uri::classify_and_normalize;
