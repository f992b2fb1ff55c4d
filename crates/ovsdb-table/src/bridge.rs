//! Bridge and port management on the local Open vSwitch.
//!
//! Thin wrappers around single `ovs-vsctl` / `ip` invocations.

use tracing::{debug, info, instrument};

use ovsdb_common::shell::{self, CommandRunner, SystemRunner};
use ovsdb_common::{OvsdbConfig, OvsdbResult};

use crate::table::TableClient;

/// OpenFlow protocol version enabled on bridges created here.
pub const BRIDGE_PROTOCOLS: &str = "OpenFlow13";

/// A key/value pair for a row's `external_ids` column.
pub type ExternalId<'a> = (&'a str, &'a str);

/// Bridge and port operations against the local `ovs-vswitchd` database.
#[derive(Debug, Clone)]
pub struct BridgeCtl<R = SystemRunner> {
    vsctl: String,
    ip: String,
    runner: R,
}

impl BridgeCtl<SystemRunner> {
    /// Creates a controller using the default tool names.
    pub fn new() -> Self {
        Self::from_config(&OvsdbConfig::default(), SystemRunner)
    }
}

impl Default for BridgeCtl<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> BridgeCtl<R> {
    /// Creates a controller using the tools named in `config`.
    pub fn from_config(config: &OvsdbConfig, runner: R) -> Self {
        Self {
            vsctl: config.tools.vsctl.clone(),
            ip: config.tools.ip.clone(),
            runner,
        }
    }

    /// Creates a bridge, optionally tagging it with an external id.
    ///
    /// Bridge creation, protocol selection and tagging happen in a single
    /// `ovs-vsctl` transaction.
    #[instrument(skip(self))]
    pub fn add_br(&self, bridge: &str, external_id: Option<ExternalId<'_>>) -> OvsdbResult<()> {
        let protocols = format!("protocols={}", BRIDGE_PROTOCOLS);
        let mut args = vec!["add-br", bridge, "--", "set", "bridge", bridge, protocols.as_str()];
        if let Some((key, value)) = external_id {
            args.extend(["--", "br-set-external-id", bridge, key, value]);
        }
        shell::run_checked(&self.runner, &self.vsctl, &args)?;
        info!("Added bridge {}", bridge);
        Ok(())
    }

    /// Removes a bridge.
    #[instrument(skip(self))]
    pub fn del_br(&self, bridge: &str) -> OvsdbResult<()> {
        shell::run_checked(&self.runner, &self.vsctl, &["del-br", bridge])?;
        info!("Removed bridge {}", bridge);
        Ok(())
    }

    /// Brings `port` up and attaches it to `bridge`.
    ///
    /// With an external id, every `port` row named `port` gets
    /// `external_ids:<key>=<value>`.
    #[instrument(skip(self))]
    pub fn add_port(
        &self,
        bridge: &str,
        port: &str,
        external_id: Option<ExternalId<'_>>,
    ) -> OvsdbResult<()> {
        shell::run_checked(&self.runner, &self.ip, &["link", "set", port, "up"])?;
        shell::run_checked(&self.runner, &self.vsctl, &["add-port", bridge, port])?;
        info!("Added port {} to bridge {}", port, bridge);

        if let Some((key, value)) = external_id {
            let ports = TableClient::with_runner(self.vsctl.as_str(), "port", &self.runner);
            let column = format!("external_ids:{}", key);
            for row in ports.find(&format!("name={}", port))? {
                if let Some(uuid) = row.uuid() {
                    ports.set(uuid, &column, value)?;
                    debug!(uuid = %uuid, "Tagged port {} with {}={}", port, key, value);
                }
            }
        }
        Ok(())
    }

    /// Detaches `port` from `bridge`.
    #[instrument(skip(self))]
    pub fn del_port(&self, bridge: &str, port: &str) -> OvsdbResult<()> {
        shell::run_checked(&self.runner, &self.vsctl, &["del-port", bridge, port])?;
        info!("Removed port {} from bridge {}", port, bridge);
        Ok(())
    }

    /// Lists the ports attached to `bridge`.
    #[instrument(skip(self))]
    pub fn list_ports(&self, bridge: &str) -> OvsdbResult<Vec<String>> {
        let output = shell::run_checked(&self.runner, &self.vsctl, &["list-ports", bridge])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}
