//! Command execution for the OVS/OVN command line tools.
//!
//! Every operation in this workspace is a single invocation of an external
//! program (`ovs-vsctl`, `ovn-nbctl`, `ovs-appctl`, ...) followed by parsing
//! of its output. This module is the only place that spawns processes.
//!
//! Programs are spawned directly with an argument vector, never through a
//! shell, so arguments such as `find` conditions reach the tool verbatim.
//! [`shellquote`] and [`display_command`] exist only to render commands for
//! logs and error messages.
//!
//! # Example
//!
//! ```ignore
//! use ovsdb_common::shell::{self, SystemRunner, OVS_VSCTL};
//!
//! let ports = shell::run_checked(&SystemRunner, OVS_VSCTL, &["list-ports", "br-int"])?;
//! ```

use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{OvsdbError, OvsdbResult};

/// Open vSwitch database utility.
pub const OVS_VSCTL: &str = "ovs-vsctl";

/// OVN Northbound database utility.
pub const OVN_NBCTL: &str = "ovn-nbctl";

/// OVN Southbound database utility.
pub const OVN_SBCTL: &str = "ovn-sbctl";

/// Daemon control socket utility.
pub const OVS_APPCTL: &str = "ovs-appctl";

/// The `ip` command for network interface configuration.
pub const IP_CMD: &str = "ip";

/// Directory holding pid files and control sockets of the OVS/OVN daemons.
pub const OVS_RUNDIR: &str = "/var/run/openvswitch";

/// Regex for characters that need escaping in shell double-quotes.
/// Matches: $, `, ", \, and newline
static SHELL_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([$`"\\\n])"#).expect("Invalid regex pattern"));

/// Arguments made only of these characters are shown unquoted.
static SHELL_SAFE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_@%+=:,./-]+$").expect("Invalid regex pattern"));

/// Quotes a string for use in a shell command line.
///
/// Wraps the string in double quotes and escapes `$`, `` ` ``, `"`, `\` and
/// newline.
///
/// # Example
///
/// ```
/// use ovsdb_common::shell::shellquote;
///
/// assert_eq!(shellquote("simple"), "\"simple\"");
/// assert_eq!(shellquote("with$var"), "\"with\\$var\"");
/// ```
pub fn shellquote(s: &str) -> String {
    let escaped = SHELL_ESCAPE_RE.replace_all(s, r"\$1");
    format!("\"{}\"", escaped)
}

/// Renders a program and its arguments as a single shell command line.
///
/// Arguments that are safe as-is are left bare, everything else goes
/// through [`shellquote`].
pub fn display_command<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    let mut line = String::from(program);
    for arg in args {
        let arg = arg.as_ref();
        line.push(' ');
        if SHELL_SAFE_RE.is_match(arg) {
            line.push_str(arg);
        } else {
            line.push_str(&shellquote(arg));
        }
    }
    line
}

/// Result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// The exit code of the command (0 = success, -1 = killed by signal).
    pub exit_code: i32,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl ExecResult {
    /// Builds a successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Builds a failed result with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns the combined output (stdout + stderr) for error messages.
    pub fn combined_output(&self) -> String {
        let stdout = self.stdout.trim_end();
        let stderr = self.stderr.trim_end();
        if stderr.is_empty() {
            stdout.to_string()
        } else if stdout.is_empty() {
            stderr.to_string()
        } else {
            format!("{}\n{}", stdout, stderr)
        }
    }
}

/// Runs external programs on behalf of the table and status clients.
///
/// Implementations block the calling thread until the program exits.
/// A non-zero exit is reported through [`ExecResult::exit_code`], not as an
/// error; errors are reserved for programs that could not be run at all.
pub trait CommandRunner {
    /// Runs `program` with `args` and captures its output.
    fn run(&self, program: &str, args: &[String]) -> OvsdbResult<ExecResult>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &str, args: &[String]) -> OvsdbResult<ExecResult> {
        (**self).run(program, args)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for Arc<T> {
    fn run(&self, program: &str, args: &[String]) -> OvsdbResult<ExecResult> {
        (**self).run(program, args)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for Box<T> {
    fn run(&self, program: &str, args: &[String]) -> OvsdbResult<ExecResult> {
        (**self).run(program, args)
    }
}

/// Runs programs as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> OvsdbResult<ExecResult> {
        let command = display_command(program, args);
        tracing::debug!(command = %command, "Executing command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => OvsdbError::ToolNotFound {
                    command: command.clone(),
                },
                _ => OvsdbError::ShellExec {
                    command: command.clone(),
                    source: e,
                },
            })?;

        let result = ExecResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if result.success() {
            tracing::trace!(command = %command, "Command succeeded");
        } else {
            tracing::warn!(
                command = %command,
                exit_code = result.exit_code,
                stderr = %result.stderr.trim_end(),
                "Command failed"
            );
        }

        Ok(result)
    }
}

/// Converts borrowed arguments into the owned form [`CommandRunner`] takes.
pub fn to_args<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter().map(|a| a.as_ref().to_string()).collect()
}

/// Runs a command and fails on non-zero exit.
///
/// # Returns
///
/// * `Ok(String)` - The stdout output on success
/// * `Err(OvsdbError::CommandFailed)` - If the command returns non-zero
/// * `Err(OvsdbError::ToolNotFound)` - If the program does not exist
pub fn run_checked<R, S>(runner: &R, program: &str, args: &[S]) -> OvsdbResult<String>
where
    R: CommandRunner + ?Sized,
    S: AsRef<str>,
{
    let args = to_args(args);
    let result = runner.run(program, &args)?;
    if result.success() {
        Ok(result.stdout)
    } else {
        Err(OvsdbError::CommandFailed {
            command: display_command(program, &args),
            exit_code: result.exit_code,
            output: result.combined_output(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shellquote_simple() {
        assert_eq!(shellquote("simple"), "\"simple\"");
        assert_eq!(shellquote("br-int"), "\"br-int\"");
    }

    #[test]
    fn test_shellquote_special_chars() {
        assert_eq!(shellquote("$HOME"), "\"\\$HOME\"");
        assert_eq!(shellquote("`whoami`"), "\"\\`whoami\\`\"");
        assert_eq!(shellquote("say \"hello\""), "\"say \\\"hello\\\"\"");
        assert_eq!(shellquote("path\\to"), "\"path\\\\to\"");
    }

    #[test]
    fn test_shellquote_empty() {
        assert_eq!(shellquote(""), "\"\"");
    }

    #[test]
    fn test_display_command_bare() {
        let line = display_command(OVS_VSCTL, &["-f", "json", "find", "port", "name=eth0"]);
        assert_eq!(line, "ovs-vsctl -f json find port name=eth0");
    }

    #[test]
    fn test_display_command_quotes_unsafe_args() {
        let line = display_command(OVS_VSCTL, &["find", "port", "name=\"eth 0\""]);
        assert_eq!(line, "ovs-vsctl find port \"name=\\\"eth 0\\\"\"");

        let line = display_command(OVS_VSCTL, &["set", "x", ""]);
        assert_eq!(line, "ovs-vsctl set x \"\"");
    }

    #[test]
    fn test_exec_result_success() {
        let result = ExecResult::ok("output\n");
        assert!(result.success());
        assert_eq!(result.combined_output(), "output");
    }

    #[test]
    fn test_exec_result_failure() {
        let result = ExecResult::failed(1, "error message");
        assert!(!result.success());
        assert_eq!(result.combined_output(), "error message");
    }

    #[test]
    fn test_exec_result_combined() {
        let result = ExecResult {
            exit_code: 0,
            stdout: "stdout\n".to_string(),
            stderr: "stderr\n".to_string(),
        };
        assert_eq!(result.combined_output(), "stdout\nstderr");
    }

    #[test]
    fn test_system_runner_echo() {
        let result = SystemRunner.run("echo", &to_args(&["hello"])).unwrap();
        assert!(result.success());
        assert_eq!(result.stdout, "hello\n");
    }

    #[test]
    fn test_system_runner_passes_args_verbatim() {
        let result = SystemRunner
            .run("echo", &to_args(&["name=\"br int\"", "$HOME"]))
            .unwrap();
        assert_eq!(result.stdout, "name=\"br int\" $HOME\n");
    }

    #[test]
    fn test_system_runner_exit_code() {
        let result = SystemRunner.run("sh", &to_args(&["-c", "exit 42"])).unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, 42);
    }

    #[test]
    fn test_system_runner_not_found() {
        let err = SystemRunner
            .run("ovsdb-rs-no-such-tool", &[])
            .unwrap_err();
        assert!(matches!(err, OvsdbError::ToolNotFound { .. }));
        assert!(err.is_external_tool_error());
    }

    #[test]
    fn test_run_checked_success() {
        let output = run_checked(&SystemRunner, "echo", &["success"]).unwrap();
        assert_eq!(output, "success\n");
    }

    #[test]
    fn test_run_checked_failure() {
        let result = run_checked(&SystemRunner, "sh", &["-c", "echo boom >&2; exit 3"]);
        match result {
            Err(OvsdbError::CommandFailed {
                exit_code, output, ..
            }) => {
                assert_eq!(exit_code, 3);
                assert_eq!(output, "boom");
            }
            other => panic!("Expected CommandFailed error, got {:?}", other),
        }
    }
}
