//! Command line definition and dispatch.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use ovsdb_cluster::AppCtl;
use ovsdb_common::config::DEFAULT_CONFIG_PATH;
use ovsdb_common::{CommandRunner, OvsdbConfig};
use ovsdb_table::{BridgeCtl, Row, TableClient};

/// Query and modify OVS/OVN databases and inspect OVSDB cluster status
#[derive(Parser, Debug)]
#[command(name = "ovsdb-tool")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Database tool to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DbTool {
    /// Open vSwitch database (ovs-vsctl)
    Vsctl,
    /// OVN Northbound database (ovn-nbctl)
    Nbctl,
    /// OVN Southbound database (ovn-sbctl)
    Sbctl,
}

impl DbTool {
    /// Program name for this tool according to `config`.
    pub fn program<'a>(&self, config: &'a OvsdbConfig) -> &'a str {
        match self {
            DbTool::Vsctl => &config.tools.vsctl,
            DbTool::Nbctl => &config.tools.nbctl,
            DbTool::Sbctl => &config.tools.sbctl,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every row of a table as JSON
    List { tool: DbTool, table: String },

    /// Print the rows of a table matching a condition as JSON
    Find {
        tool: DbTool,
        table: String,
        /// Condition in the tool's syntax, e.g. name=br-int
        condition: String,
    },

    /// Set a column of a row
    Set {
        tool: DbTool,
        table: String,
        record: String,
        column: String,
        value: String,
    },

    /// Reset a column of a row to its default
    Clear {
        tool: DbTool,
        table: String,
        record: String,
        column: String,
    },

    /// Remove a value from a set or map column of a row
    Remove {
        tool: DbTool,
        table: String,
        record: String,
        column: String,
        value: String,
    },

    /// Print the cluster status of a database server as JSON
    ClusterStatus {
        /// ovnnb_db, ovnsb_db, a daemon name or a control socket path
        target: String,
        #[arg(long)]
        schema: Option<String>,
    },

    /// Exit 0 if the target leads its cluster, 1 otherwise
    IsLeader {
        target: String,
        #[arg(long)]
        schema: Option<String>,
    },

    /// Exit 0 if the local ovn-northd is active, 1 otherwise
    NorthdActive,

    /// Create a bridge
    AddBr {
        bridge: String,
        /// external_ids entry as key=value
        #[arg(long, value_parser = parse_external_id)]
        external_id: Option<(String, String)>,
    },

    /// Delete a bridge
    DelBr { bridge: String },

    /// Bring a port up and attach it to a bridge
    AddPort {
        bridge: String,
        port: String,
        /// external_ids entry as key=value
        #[arg(long, value_parser = parse_external_id)]
        external_id: Option<(String, String)>,
    },

    /// Detach a port from a bridge
    DelPort { bridge: String, port: String },

    /// Print the ports attached to a bridge, one per line
    ListPorts { bridge: String },
}

fn parse_external_id(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

/// Outcome of a command, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// A boolean query answered "no".
    No,
}

impl Outcome {
    fn from_bool(answer: bool) -> Self {
        if answer {
            Outcome::Success
        } else {
            Outcome::No
        }
    }
}

fn print_rows<W: Write>(out: &mut W, rows: impl Iterator<Item = Row>) -> Result<()> {
    let rows: Vec<Row> = rows.collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}

fn external_id(pair: &Option<(String, String)>) -> Option<(&str, &str)> {
    pair.as_ref().map(|(k, v)| (k.as_str(), v.as_str()))
}

/// Runs one command, writing its output to `out`.
pub fn run<R, W>(command: &Command, config: &OvsdbConfig, runner: &R, out: &mut W) -> Result<Outcome>
where
    R: CommandRunner,
    W: Write,
{
    let table = |tool: DbTool, name: &str| TableClient::with_runner(tool.program(config), name, runner);
    let appctl = || AppCtl::from_config(config, runner);
    let bridges = || BridgeCtl::from_config(config, runner);

    match command {
        Command::List { tool, table: name } => {
            let rows = table(*tool, name.as_str())
                .list()
                .with_context(|| format!("listing table {}", name))?;
            print_rows(out, rows)?;
        }
        Command::Find {
            tool,
            table: name,
            condition,
        } => {
            let rows = table(*tool, name.as_str())
                .find(condition)
                .with_context(|| format!("searching table {} for {}", name, condition))?;
            print_rows(out, rows)?;
        }
        Command::Set {
            tool,
            table: name,
            record,
            column,
            value,
        } => {
            table(*tool, name.as_str()).set(record, column, value)?;
            info!("Set {}:{} of {} in {}", column, value, record, name);
        }
        Command::Clear {
            tool,
            table: name,
            record,
            column,
        } => {
            table(*tool, name.as_str()).clear(record, column)?;
        }
        Command::Remove {
            tool,
            table: name,
            record,
            column,
            value,
        } => {
            table(*tool, name.as_str()).remove(record, column, value)?;
        }
        Command::ClusterStatus { target, schema } => {
            let record = appctl()
                .cluster_status(target, schema.as_deref())
                .with_context(|| format!("retrieving cluster status of {}", target))?;
            serde_json::to_writer_pretty(&mut *out, &record)?;
            writeln!(out)?;
        }
        Command::IsLeader { target, schema } => {
            return Ok(Outcome::from_bool(
                appctl().is_cluster_leader(target, schema.as_deref()),
            ));
        }
        Command::NorthdActive => {
            return Ok(Outcome::from_bool(appctl().is_northd_active()));
        }
        Command::AddBr {
            bridge,
            external_id: id,
        } => bridges().add_br(bridge, external_id(id))?,
        Command::DelBr { bridge } => bridges().del_br(bridge)?,
        Command::AddPort {
            bridge,
            port,
            external_id: id,
        } => bridges().add_port(bridge, port, external_id(id))?,
        Command::DelPort { bridge, port } => bridges().del_port(bridge, port)?,
        Command::ListPorts { bridge } => {
            for port in bridges().list_ports(bridge)? {
                writeln!(out, "{}", port)?;
            }
        }
    }

    Ok(Outcome::Success)
}

/// Loads and validates the configuration named on the command line.
pub fn load_config(path: &Path) -> Result<OvsdbConfig> {
    OvsdbConfig::load_or_default(path).with_context(|| format!("loading configuration from {}", path.display()))
}
