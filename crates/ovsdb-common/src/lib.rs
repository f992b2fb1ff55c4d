//! Common infrastructure for the OVSDB management crates.
//!
//! - [`shell`]: Running the OVS/OVN command line tools
//! - [`error`]: Error types shared by every crate in the workspace
//! - [`config`]: Tool names and filesystem locations, loaded from TOML
//!
//! # Example
//!
//! ```ignore
//! use ovsdb_common::{
//!     shell::{self, SystemRunner, OVS_VSCTL},
//!     OvsdbResult,
//! };
//!
//! fn bridges() -> OvsdbResult<Vec<String>> {
//!     let out = shell::run_checked(&SystemRunner, OVS_VSCTL, &["list-br"])?;
//!     Ok(out.lines().map(str::to_string).collect())
//! }
//! ```

pub mod config;
pub mod error;
pub mod shell;

// Re-export commonly used items at crate root
pub use config::OvsdbConfig;
pub use error::{OvsdbError, OvsdbResult};
pub use shell::{CommandRunner, ExecResult, SystemRunner};
