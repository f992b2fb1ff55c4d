//! Verification helpers for command execution
//!
//! Assertions over the invocations recorded by [`MockRunner`].

use thiserror::Error;

use crate::MockRunner;

/// Verification error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Expected command '{expected}' was not run; ran: {actual:?}")]
    CommandNotRun {
        expected: String,
        actual: Vec<String>,
    },

    #[error("Program '{program}' was run unexpectedly: {command}")]
    UnexpectedProgram { program: String, command: String },

    #[error("Expected {expected} commands, {actual} were run")]
    CallCountMismatch { expected: usize, actual: usize },
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Verifier over a mock runner's recorded invocations
pub struct CommandVerifier<'a> {
    runner: &'a MockRunner,
}

impl<'a> CommandVerifier<'a> {
    /// Create a new verifier
    pub fn new(runner: &'a MockRunner) -> Self {
        Self { runner }
    }

    /// Verify that a command line was run at least once
    pub fn assert_ran(&self, command_line: &str) -> VerifyResult<()> {
        let actual = self.runner.command_lines();
        if actual.iter().any(|c| c == command_line) {
            Ok(())
        } else {
            Err(VerificationError::CommandNotRun {
                expected: command_line.to_string(),
                actual,
            })
        }
    }

    /// Verify that exactly these command lines were run, in this order
    pub fn assert_sequence(&self, command_lines: &[&str]) -> VerifyResult<()> {
        let actual = self.runner.command_lines();
        if actual.len() != command_lines.len() {
            return Err(VerificationError::CallCountMismatch {
                expected: command_lines.len(),
                actual: actual.len(),
            });
        }
        for (expected, ran) in command_lines.iter().zip(&actual) {
            if ran != expected {
                return Err(VerificationError::CommandNotRun {
                    expected: expected.to_string(),
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }

    /// Verify that a program was never run
    pub fn assert_not_run(&self, program: &str) -> VerifyResult<()> {
        match self.runner.calls().into_iter().find(|c| c.program == program) {
            Some(call) => Err(VerificationError::UnexpectedProgram {
                program: program.to_string(),
                command: call.command_line(),
            }),
            None => Ok(()),
        }
    }

    /// Verify the number of commands run
    pub fn assert_call_count(&self, expected: usize) -> VerifyResult<()> {
        let actual = self.runner.call_count();
        if actual == expected {
            Ok(())
        } else {
            Err(VerificationError::CallCountMismatch { expected, actual })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovsdb_common::shell::{to_args, CommandRunner};

    fn runner_with_calls() -> MockRunner {
        let runner = MockRunner::new();
        runner.run("ip", &to_args(&["link", "set", "eth1", "up"])).unwrap();
        runner
            .run("ovs-vsctl", &to_args(&["add-port", "br-ex", "eth1"]))
            .unwrap();
        runner
    }

    #[test]
    fn test_assert_ran() {
        let runner = runner_with_calls();
        let verifier = CommandVerifier::new(&runner);
        assert!(verifier.assert_ran("ovs-vsctl add-port br-ex eth1").is_ok());
        assert!(matches!(
            verifier.assert_ran("ovs-vsctl del-port br-ex eth1"),
            Err(VerificationError::CommandNotRun { .. })
        ));
    }

    #[test]
    fn test_assert_sequence() {
        let runner = runner_with_calls();
        let verifier = CommandVerifier::new(&runner);
        assert!(verifier
            .assert_sequence(&["ip link set eth1 up", "ovs-vsctl add-port br-ex eth1"])
            .is_ok());
        assert!(verifier
            .assert_sequence(&["ovs-vsctl add-port br-ex eth1", "ip link set eth1 up"])
            .is_err());
        assert_eq!(
            verifier.assert_sequence(&["ip link set eth1 up"]),
            Err(VerificationError::CallCountMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_assert_not_run() {
        let runner = runner_with_calls();
        let verifier = CommandVerifier::new(&runner);
        assert!(verifier.assert_not_run("ovs-appctl").is_ok());
        assert!(verifier.assert_not_run("ip").is_err());
        assert!(verifier.assert_call_count(2).is_ok());
    }
}
