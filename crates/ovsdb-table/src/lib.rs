//! Row access to OVS/OVN database tables through their command line tools.
//!
//! - [`TableClient`]: list/find/set/clear/remove on one table of any of the
//!   databases managed by `ovs-vsctl`, `ovn-nbctl` or `ovn-sbctl`
//! - [`Row`]/[`Rows`]: decoded query results, with the tools' `[tag, payload]`
//!   encoding of non-scalar columns unwrapped
//! - [`BridgeCtl`]: bridge and port helpers for the local Open vSwitch
//!
//! # Example
//!
//! ```ignore
//! use ovsdb_table::TableClient;
//!
//! let chassis = TableClient::new("ovn-sbctl", "chassis");
//! for row in chassis.find("hostname=compute-1")? {
//!     println!("{:?}", row.get("encaps"));
//! }
//! ```

pub mod bridge;
pub mod row;
pub mod table;

pub use bridge::{BridgeCtl, ExternalId};
pub use row::{decode_value, Row, Rows, UUID_COLUMN};
pub use table::TableClient;
