//! Scripted command runner
//!
//! Stands in for the real OVS/OVN tools: responses are registered per
//! program and argument prefix, and every invocation is recorded.

use parking_lot::Mutex;

use ovsdb_common::shell::{self, CommandRunner};
use ovsdb_common::{ExecResult, OvsdbError, OvsdbResult};

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name as passed to the runner
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
}

impl Invocation {
    /// Renders the invocation as a shell command line
    pub fn command_line(&self) -> String {
        shell::display_command(&self.program, &self.args)
    }
}

#[derive(Debug, Clone)]
enum Response {
    Output(ExecResult),
    NotFound,
}

#[derive(Debug, Clone)]
struct Expectation {
    program: String,
    args_prefix: Vec<String>,
    response: Response,
}

impl Expectation {
    fn matches(&self, program: &str, args: &[String]) -> bool {
        self.program == program && args.starts_with(&self.args_prefix)
    }
}

/// Command runner returning canned output
///
/// Responses are matched in registration order; the first one whose
/// program equals the invoked program and whose argument prefix matches
/// wins. Unmatched invocations succeed with empty output. Responses are not
/// consumed, so the same query can be issued any number of times.
#[derive(Debug, Default)]
pub struct MockRunner {
    expectations: Vec<Expectation>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds silently
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `result` for `program` invoked with arguments starting with `args_prefix`
    pub fn respond(mut self, program: &str, args_prefix: &[&str], result: ExecResult) -> Self {
        self.expectations.push(Expectation {
            program: program.to_string(),
            args_prefix: shell::to_args(args_prefix),
            response: Response::Output(result),
        });
        self
    }

    /// Report `program` as missing from the system
    pub fn not_found(mut self, program: &str) -> Self {
        self.expectations.push(Expectation {
            program: program.to_string(),
            args_prefix: Vec::new(),
            response: Response::NotFound,
        });
        self
    }

    /// All invocations so far, oldest first
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    /// All invocations so far rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(Invocation::command_line).collect()
    }

    /// Number of invocations so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[String]) -> OvsdbResult<ExecResult> {
        let invocation = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        };
        tracing::debug!(command = %invocation.command_line(), "Mock command");
        self.calls.lock().push(invocation);

        let response = self
            .expectations
            .iter()
            .find(|e| e.matches(program, args))
            .map(|e| e.response.clone());

        match response {
            Some(Response::Output(result)) => Ok(result),
            Some(Response::NotFound) => Err(OvsdbError::ToolNotFound {
                command: shell::display_command(program, args),
            }),
            None => Ok(ExecResult::ok("")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_command_succeeds() {
        let runner = MockRunner::new();
        let result = runner.run("ovs-vsctl", &shell::to_args(&["del-br", "br-ex"])).unwrap();
        assert!(result.success());
        assert!(result.stdout.is_empty());
        assert_eq!(runner.command_lines(), vec!["ovs-vsctl del-br br-ex"]);
    }

    #[test]
    fn test_prefix_matching_in_registration_order() {
        let runner = MockRunner::new()
            .respond("ovs-appctl", &["-t", "ovn-northd"], ExecResult::ok("northd"))
            .respond("ovs-appctl", &[], ExecResult::ok("any"));

        let northd = runner
            .run("ovs-appctl", &shell::to_args(&["-t", "ovn-northd", "status"]))
            .unwrap();
        assert_eq!(northd.stdout, "northd");

        let other = runner
            .run("ovs-appctl", &shell::to_args(&["-t", "ovsdb-server", "status"]))
            .unwrap();
        assert_eq!(other.stdout, "any");
    }

    #[test]
    fn test_not_found() {
        let runner = MockRunner::new().not_found("ovn-nbctl");
        let err = runner.run("ovn-nbctl", &[]).unwrap_err();
        assert!(matches!(err, OvsdbError::ToolNotFound { .. }));
        assert_eq!(runner.call_count(), 1);
    }
}
