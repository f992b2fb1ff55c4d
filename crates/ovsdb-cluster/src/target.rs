//! Control socket targets for `ovs-appctl`.

use std::path::{Path, PathBuf};

use ovsdb_common::shell::OVS_RUNDIR;

/// The clustered OVN databases with well-known control sockets.
///
/// Their `ovsdb-server` processes name the control socket after the database
/// rather than the pid file, so `ovs-appctl` cannot find them by name and
/// needs the full path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownDatabase {
    /// OVN Northbound database server.
    Northbound,
    /// OVN Southbound database server.
    Southbound,
}

impl KnownDatabase {
    /// All known databases.
    pub const ALL: [KnownDatabase; 2] = [KnownDatabase::Northbound, KnownDatabase::Southbound];

    /// Looks up a database by its daemon short name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|db| db.name() == name)
    }

    /// Daemon short name, also the socket file stem.
    pub fn name(&self) -> &'static str {
        match self {
            KnownDatabase::Northbound => "ovnnb_db",
            KnownDatabase::Southbound => "ovnsb_db",
        }
    }

    /// Database schema served by the daemon.
    pub fn schema(&self) -> &'static str {
        match self {
            KnownDatabase::Northbound => "OVN_Northbound",
            KnownDatabase::Southbound => "OVN_Southbound",
        }
    }

    /// Control socket path inside `run_dir`.
    pub fn socket_path(&self, run_dir: &Path) -> PathBuf {
        run_dir.join(format!("{}.ctl", self.name()))
    }
}

/// Where an `ovs-appctl` query is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One of the OVN database servers, addressed by socket path.
    Database {
        database: KnownDatabase,
        socket: PathBuf,
    },
    /// Anything else, handed to `ovs-appctl -t` unchanged. Either a daemon
    /// name (resolved by `ovs-appctl` through its pid file) or a socket path.
    Other(String),
}

impl Target {
    /// Resolves a target against the default run directory.
    pub fn resolve(target: &str) -> Self {
        Self::resolve_in(target, Path::new(OVS_RUNDIR))
    }

    /// Resolves a target against `run_dir`.
    pub fn resolve_in(target: &str, run_dir: &Path) -> Self {
        match KnownDatabase::from_name(target) {
            Some(database) => Target::Database {
                database,
                socket: database.socket_path(run_dir),
            },
            None => Target::Other(target.to_string()),
        }
    }

    /// The value for `ovs-appctl -t`.
    pub fn socket(&self) -> String {
        match self {
            Target::Database { socket, .. } => socket.display().to_string(),
            Target::Other(target) => target.clone(),
        }
    }

    /// Schema implied by the target, if any.
    pub fn schema(&self) -> Option<&'static str> {
        match self {
            Target::Database { database, .. } => Some(database.schema()),
            Target::Other(_) => None,
        }
    }
}
