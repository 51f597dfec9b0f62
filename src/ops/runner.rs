//! # Command Runner
//!
//! Spawns the external commands, one at a time, blocking until each exits.
//! stdin is closed and stdout/stderr are captured for the transcript; the
//! commands must not expect an interactive terminal.
//!
//! There is deliberately no retry, classification, or rollback: a failed
//! command becomes a report and the batch keeps going.

use log::{info, warn};
use std::process::{Command, Stdio};

use super::CommandSpec;

/// What happened to one spawned command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The process ran to completion. `code` is `None` when it was killed
    /// by a signal.
    Finished {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The process could not be started at all (e.g. binary not installed).
    SpawnFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReport {
    pub spec: CommandSpec,
    pub outcome: Outcome,
}

impl CommandReport {
    pub fn success(&self) -> bool {
        matches!(self.outcome, Outcome::Finished { code: Some(0), .. })
    }
}

/// Run every spec in order, collecting a report per command.
pub fn run_all(specs: Vec<CommandSpec>) -> Vec<CommandReport> {
    specs.into_iter().map(run_one).collect()
}

fn run_one(spec: CommandSpec) -> CommandReport {
    info!("Running: {}", spec);

    let result = Command::new(spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    let outcome = match result {
        Ok(output) => {
            let code = output.status.code();
            if !output.status.success() {
                warn!("{} exited with {:?}", spec.program, code);
            }
            Outcome::Finished {
                code,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        }
        Err(e) => {
            warn!("failed to spawn {}: {}", spec.program, e);
            Outcome::SpawnFailed(e.to_string())
        }
    };

    CommandReport { spec, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_captures_stdout_and_exit_zero() {
        let reports = run_all(vec![sh("printf hello")]);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].success());
        assert_eq!(
            reports[0].outcome,
            Outcome::Finished {
                code: Some(0),
                stdout: "hello".to_string(),
                stderr: String::new(),
            }
        );
    }

    #[test]
    fn test_captures_stderr_and_nonzero_exit() {
        let reports = run_all(vec![sh("printf oops 1>&2; exit 3")]);
        assert!(!reports[0].success());
        match &reports[0].outcome {
            Outcome::Finished {
                code,
                stdout,
                stderr,
            } => {
                assert_eq!(*code, Some(3));
                assert!(stdout.is_empty());
                assert_eq!(stderr, "oops");
            }
            other => panic!("expected Finished, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_keeps_going_after_failure() {
        let reports = run_all(vec![sh("exit 1"), sh("printf second")]);
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].success());
        assert!(reports[1].success());
    }

    #[test]
    fn test_missing_binary_is_spawn_failure() {
        let spec = CommandSpec::new("gitup-no-such-binary", vec![]);
        let reports = run_all(vec![spec]);
        assert!(!reports[0].success());
        assert!(matches!(reports[0].outcome, Outcome::SpawnFailed(_)));
    }

    #[test]
    fn test_stdin_is_closed() {
        // `cat` would block forever on an open stdin; a closed one ends it.
        let reports = run_all(vec![CommandSpec::new("cat", vec![])]);
        assert!(reports[0].success());
    }
}
