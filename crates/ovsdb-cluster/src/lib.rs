//! Cluster status of clustered OVSDB servers and OVN daemons.
//!
//! - [`Target`]: resolves a daemon name to the control socket `ovs-appctl`
//!   talks to, and to the database schema it serves
//! - [`StatusRecord`]: the parsed `cluster/status` report
//! - [`AppCtl`]: runs the queries, and answers "is this server the cluster
//!   leader?" and "is the local `ovn-northd` active?"
//!
//! # Example
//!
//! ```ignore
//! use ovsdb_cluster::AppCtl;
//!
//! let appctl = AppCtl::new();
//! if appctl.is_cluster_leader("ovnnb_db", None) {
//!     let status = appctl.cluster_status("ovnnb_db", None)?;
//!     println!("servers: {:?}", status.servers());
//! }
//! ```

pub mod appctl;
pub mod status;
pub mod target;

pub use appctl::{AppCtl, NORTHD_TARGET};
pub use status::{StatusRecord, StatusValue, LEADER_SELF};
pub use target::{KnownDatabase, Target};
