//! Configuration for the OVSDB management tools.
//!
//! Loaded from a TOML file. Every field has a default, so a partial file
//! (or no file at all) is valid.
//! Default location: /etc/ovsdb-tool/config.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OvsdbError, OvsdbResult};
use crate::shell;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/ovsdb-tool/config.toml";

/// Filesystem locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the daemon control sockets
    #[serde(default = "default_run_dir")]
    pub run_dir: PathBuf,
}

/// Names or paths of the external tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Open vSwitch database utility
    #[serde(default = "default_vsctl")]
    pub vsctl: String,

    /// OVN Northbound database utility
    #[serde(default = "default_nbctl")]
    pub nbctl: String,

    /// OVN Southbound database utility
    #[serde(default = "default_sbctl")]
    pub sbctl: String,

    /// Control socket utility
    #[serde(default = "default_appctl")]
    pub appctl: String,

    /// Network interface utility
    #[serde(default = "default_ip")]
    pub ip: String,
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvsdbConfig {
    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// External tools
    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_run_dir() -> PathBuf {
    PathBuf::from(shell::OVS_RUNDIR)
}

fn default_vsctl() -> String {
    shell::OVS_VSCTL.to_string()
}

fn default_nbctl() -> String {
    shell::OVN_NBCTL.to_string()
}

fn default_sbctl() -> String {
    shell::OVN_SBCTL.to_string()
}

fn default_appctl() -> String {
    shell::OVS_APPCTL.to_string()
}

fn default_ip() -> String {
    shell::IP_CMD.to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            run_dir: default_run_dir(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            vsctl: default_vsctl(),
            nbctl: default_nbctl(),
            sbctl: default_sbctl(),
            appctl: default_appctl(),
            ip: default_ip(),
        }
    }
}

impl OvsdbConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> OvsdbResult<Self> {
        toml::from_str(content)
            .map_err(|e| OvsdbError::invalid_config("toml", e.to_string()))
    }

    /// Loads configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> OvsdbResult<Self> {
        let path = path.as_ref();

        let config = match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| match e {
                OvsdbError::InvalidConfig { message, .. } => {
                    OvsdbError::invalid_config(path.display().to_string(), message)
                }
                other => other,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(OvsdbError::Io(e)),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates configuration
    pub fn validate(&self) -> OvsdbResult<()> {
        if self.paths.run_dir.as_os_str().is_empty() {
            return Err(OvsdbError::invalid_config(
                "paths.run_dir",
                "must not be empty",
            ));
        }

        let tools = [
            ("tools.vsctl", &self.tools.vsctl),
            ("tools.nbctl", &self.tools.nbctl),
            ("tools.sbctl", &self.tools.sbctl),
            ("tools.appctl", &self.tools.appctl),
            ("tools.ip", &self.tools.ip),
        ];
        for (field, value) in tools {
            if value.trim().is_empty() {
                return Err(OvsdbError::invalid_config(field, "must not be empty"));
            }
        }

        Ok(())
    }
}
