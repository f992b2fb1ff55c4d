//! Queries against daemon control sockets through `ovs-appctl`.

use std::path::PathBuf;

use tracing::{debug, instrument};

use ovsdb_common::shell::{self, CommandRunner, SystemRunner};
use ovsdb_common::{OvsdbConfig, OvsdbResult};

use crate::status::StatusRecord;
use crate::target::Target;

/// Daemon name of the OVN northbound-to-southbound translator.
pub const NORTHD_TARGET: &str = "ovn-northd";

/// Control socket client.
///
/// Holds no state besides the tool name and run directory; every query is
/// one `ovs-appctl` invocation.
#[derive(Debug, Clone)]
pub struct AppCtl<R = SystemRunner> {
    appctl: String,
    run_dir: PathBuf,
    runner: R,
}

impl AppCtl<SystemRunner> {
    /// Creates a client using the default tool name and run directory.
    pub fn new() -> Self {
        Self::from_config(&OvsdbConfig::default(), SystemRunner)
    }
}

impl Default for AppCtl<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> AppCtl<R> {
    /// Creates a client using the tool and run directory from `config`.
    pub fn from_config(config: &OvsdbConfig, runner: R) -> Self {
        Self {
            appctl: config.tools.appctl.clone(),
            run_dir: config.paths.run_dir.clone(),
            runner,
        }
    }

    /// Resolves a target name against this client's run directory.
    pub fn resolve(&self, target: &str) -> Target {
        Target::resolve_in(target, &self.run_dir)
    }

    /// Runs `ovs-appctl -t <target> <args...>` and returns its output.
    pub fn call(&self, target: &Target, args: &[&str]) -> OvsdbResult<String> {
        let socket = target.socket();
        let mut argv = vec!["-t", socket.as_str()];
        argv.extend_from_slice(args);
        shell::run_checked(&self.runner, &self.appctl, &argv)
    }

    /// Retrieves the cluster status of a clustered database server.
    ///
    /// `target` is usually `ovsdb-server`, `ovnnb_db` or `ovnsb_db`, or a
    /// control socket path. The schema defaults to the one implied by the
    /// target; when there is none and none is given, `ovs-appctl` is asked
    /// without one.
    #[instrument(skip(self))]
    pub fn cluster_status(&self, target: &str, schema: Option<&str>) -> OvsdbResult<StatusRecord> {
        let target = self.resolve(target);
        let mut args = vec!["cluster/status"];
        if let Some(schema) = schema.or(target.schema()) {
            args.push(schema);
        }

        let output = self.call(&target, &args)?;
        let record = StatusRecord::parse(&output);
        debug!(fields = record.len(), "Parsed cluster status");
        Ok(record)
    }

    /// True if `target` reports itself as the leader of its cluster.
    ///
    /// A failed query counts as not leader.
    #[instrument(skip(self))]
    pub fn is_cluster_leader(&self, target: &str, schema: Option<&str>) -> bool {
        match self.cluster_status(target, schema) {
            Ok(record) => record.is_leader(),
            Err(e) => {
                debug!(error = %e, "Cluster status unavailable, not leader");
                false
            }
        }
    }

    /// True if the local `ovn-northd` reports itself active.
    ///
    /// A failed query counts as not active.
    #[instrument(skip(self))]
    pub fn is_northd_active(&self) -> bool {
        let target = self.resolve(NORTHD_TARGET);
        match self.call(&target, &["status"]) {
            Ok(output) => output
                .lines()
                .any(|line| line.starts_with("Status:") && line.contains("active")),
            Err(e) => {
                debug!(error = %e, "ovn-northd status unavailable, not active");
                false
            }
        }
    }
}
