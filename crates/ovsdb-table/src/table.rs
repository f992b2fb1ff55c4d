//! TableClient - row access to one table of an OVS/OVN database.

use tracing::{debug, instrument};

use ovsdb_common::shell::{self, CommandRunner, SystemRunner};
use ovsdb_common::OvsdbResult;

use crate::row::Rows;

/// Generic accessor for one table, driven through the database's command
/// line tool.
///
/// OVS and OVN manage their databases with tools sharing the same generic
/// database commands (`ovs-vsctl`, `ovn-nbctl`, `ovn-sbctl`), so one type
/// covers all of them. Every call is a fresh invocation of the tool; nothing
/// is cached.
///
/// # Example
///
/// ```ignore
/// use ovsdb_table::TableClient;
///
/// let bridges = TableClient::new("ovs-vsctl", "bridge");
/// for br in bridges.list()? {
///     if br.get_str("name") == Some("br-test") {
///         bridges.set(br.uuid().unwrap(), "external_ids:charm", "managed")?;
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TableClient<R = SystemRunner> {
    /// Tool with the database commands (e.g. `ovs-vsctl`).
    tool: String,
    /// Table operated on.
    table: String,
    runner: R,
}

impl TableClient<SystemRunner> {
    /// Creates a client that runs the tool as a child process.
    pub fn new(tool: impl Into<String>, table: impl Into<String>) -> Self {
        Self::with_runner(tool, table, SystemRunner)
    }
}

impl<R: CommandRunner> TableClient<R> {
    /// Creates a client that runs the tool through `runner`.
    pub fn with_runner(tool: impl Into<String>, table: impl Into<String>, runner: R) -> Self {
        Self {
            tool: tool.into(),
            table: table.into(),
            runner,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Lists every row of the table.
    ///
    /// Each call re-runs the query.
    #[instrument(skip(self), fields(tool = %self.tool, table = %self.table))]
    pub fn list(&self) -> OvsdbResult<Rows> {
        self.query(None)
    }

    /// Lists the rows matching `condition`.
    ///
    /// The condition (e.g. `name=br-int`) is handed to the tool verbatim;
    /// its syntax is whatever the tool's `find` command accepts.
    #[instrument(skip(self), fields(tool = %self.tool, table = %self.table))]
    pub fn find(&self, condition: &str) -> OvsdbResult<Rows> {
        self.query(Some(condition))
    }

    /// Sets `column` of row `record` to `value`.
    ///
    /// `column` may address a map key, e.g. `external_ids:charm`.
    #[instrument(skip(self), fields(tool = %self.tool, table = %self.table))]
    pub fn set(&self, record: &str, column: &str, value: &str) -> OvsdbResult<()> {
        let assignment = format!("{}={}", column, value);
        self.exec(&["set", &self.table, record, &assignment])
    }

    /// Resets `column` of row `record` to its schema default.
    #[instrument(skip(self), fields(tool = %self.tool, table = %self.table))]
    pub fn clear(&self, record: &str, column: &str) -> OvsdbResult<()> {
        self.exec(&["clear", &self.table, record, column])
    }

    /// Removes `value` from the set or map `column` of row `record`.
    #[instrument(skip(self), fields(tool = %self.tool, table = %self.table))]
    pub fn remove(&self, record: &str, column: &str, value: &str) -> OvsdbResult<()> {
        self.exec(&["remove", &self.table, record, column, value])
    }

    fn query(&self, condition: Option<&str>) -> OvsdbResult<Rows> {
        let mut args = vec!["-f", "json", "find", self.table.as_str()];
        if let Some(condition) = condition {
            args.push(condition);
        }

        let output = shell::run_checked(&self.runner, &self.tool, &args)?;
        let rows = Rows::parse(&shell::display_command(&self.tool, &args), &output)?;
        debug!(rows = rows.len(), "Query complete");
        Ok(rows)
    }

    fn exec(&self, args: &[&str]) -> OvsdbResult<()> {
        shell::run_checked(&self.runner, &self.tool, args)?;
        Ok(())
    }
}
