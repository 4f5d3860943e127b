//! Runtime process invocation
//!
//! The generated command is spawned as an argv with no shell in between, so
//! paths and `run` arguments are passed to the runtime verbatim instead of
//! going through shell word-splitting. The textual command printed by
//! `--debug` IS subject to word-splitting if pasted into a shell by hand.

use std::process::Command;

use tracing::{info, warn};

use crate::command::formatter::RuntimeCommand;
use crate::error::Result;

/// Spawn the runtime command, wait for it, and return its exit code.
///
/// A non-zero exit from the runtime is reported but is not an error here;
/// the caller decides how the process exit code is surfaced.
pub fn execute(command: &RuntimeCommand) -> Result<i32> {
    info!("spawning: {command}");
    let status = Command::new(&command.program).args(&command.args).status()?;
    // killed by signal on unix
    let code = status.code().unwrap_or(-1);
    if code != 0 {
        warn!("{} exited with code {code}", command.program);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(program: &str, args: &[&str]) -> RuntimeCommand {
        RuntimeCommand {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_successful_process() {
        let code = execute(&plain("true", &[])).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_failing_process_reports_code() {
        let code = execute(&plain("false", &[])).unwrap();
        assert_ne!(code, 0);
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        assert!(execute(&plain("definitely-not-a-binary-xyz", &[])).is_err());
    }
}
