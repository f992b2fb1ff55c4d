//! Test fixtures for canned tool output
//!
//! Query output in the database tools' JSON format and `ovs-appctl`
//! status reports as printed by the OVN daemons.

use serde_json::{json, Value};

/// Build `<tool> -f json find <table>` output
pub fn query_output(headings: &[&str], data: Vec<Vec<Value>>) -> String {
    json!({
        "headings": headings,
        "data": data,
    })
    .to_string()
}

/// Build query output with no rows
pub fn empty_query_output(headings: &[&str]) -> String {
    query_output(headings, Vec::new())
}

/// A tagged row reference: `["uuid", id]`
pub fn uuid(id: &str) -> Value {
    json!(["uuid", id])
}

/// A tagged set: `["set", [...]]`
pub fn set(items: Vec<Value>) -> Value {
    json!(["set", items])
}

/// A tagged map: `["map", [[k, v], ...]]`
pub fn map(pairs: &[(&str, &str)]) -> Value {
    let pairs: Vec<Value> = pairs.iter().map(|(k, v)| json!([k, v])).collect();
    json!(["map", pairs])
}

/// Common `ovs-vsctl` table fixtures
pub mod vsctl_fixtures {
    use super::*;

    /// Three bridges with mixed scalar and tagged columns
    pub fn bridges() -> String {
        query_output(
            &["_uuid", "name", "ports", "external_ids", "protocols"],
            vec![
                vec![
                    uuid("0d5c1a8e-2b6f-4e61-9b0a-2f1c9a7d0b11"),
                    json!("br-int"),
                    set(vec![uuid("a1"), uuid("a2")]),
                    map(&[]),
                    set(vec![]),
                ],
                vec![
                    uuid("6b8e3c2a-9d41-4f7a-8e55-3c0b7a1f2e22"),
                    json!("br-ex"),
                    uuid("b1"),
                    map(&[("charm-ovn-chassis", "managed")]),
                    json!("OpenFlow13"),
                ],
                vec![
                    uuid("f3a9d7e1-5c28-4b0e-a6d4-8e2f1b9c3d33"),
                    json!("br-data"),
                    set(vec![]),
                    map(&[("charm-ovn-chassis", "managed"), ("owner", "ops")]),
                    json!("OpenFlow13"),
                ],
            ],
        )
    }

    /// The `port` row created for `eth1`
    pub fn port_eth1() -> String {
        query_output(
            &["_uuid", "name", "external_ids"],
            vec![vec![uuid("5c7a0e4d-1111-4222-8333-944455556666"), json!("eth1"), map(&[])]],
        )
    }
}

/// Common `ovs-appctl` status report fixtures
pub mod status_fixtures {
    /// `cluster/status` of the Northbound database on the leader
    pub const NB_LEADER: &str = "\
a5e2
Name: OVN_Northbound
Cluster ID: 9f8e (9f8e2c41-7a3b-4d25-b1e0-6c8f4a2d9e13)
Server ID: a5e2 (a5e2b7c9-0d14-4f3e-9a86-1b5c7e2d4f60)
Address: ssl:10.0.0.11:6643
Status: cluster member
Role: leader
Term: 4
Leader: self
Vote: self

Last Election started 3022 ms ago, reason: leadership_transfer
Last Election won: 3011 ms ago
Election timer: 1000
Log: [2, 1201]
Entries not yet committed: 0
Entries not yet applied: 0
Connections: ->0000 ->7c1d <-7c1d <-e0f4
Disconnections: 0
Servers:
    a5e2 (a5e2 at ssl:10.0.0.11:6643) (self) next_index=1199 match_index=1200
    7c1d (7c1d at ssl:10.0.0.12:6643) next_index=1201 match_index=1200
    e0f4 (e0f4 at ssl:10.0.0.13:6643) next_index=1201 match_index=1200
";

    /// `cluster/status` of the Southbound database on a follower
    pub const SB_FOLLOWER: &str = "\
7c1d
Name: OVN_Southbound
Cluster ID: 31b0 (31b0d6e2-8f47-4a19-b3c5-2e7a9d1f0c84)
Server ID: 7c1d (7c1d4e8a-b2f9-4c63-8d07-5a1e3f6b9c25)
Address: ssl:10.0.0.12:6644
Status: cluster member
Role: follower
Term: 4
Leader: a5e2
Vote: a5e2

Election timer: 1000
Log: [2, 877]
Servers:
    a5e2 (a5e2 at ssl:10.0.0.11:6644) last msg 120 ms ago
    7c1d (7c1d at ssl:10.0.0.12:6644) (self)
";

    /// `status` of an active `ovn-northd`
    pub const NORTHD_ACTIVE: &str = "Status: active\n";

    /// `status` of a standby `ovn-northd`
    pub const NORTHD_STANDBY: &str = "Status: standby\n";

    /// Build a minimal `cluster/status` report
    pub fn cluster_report(leader: &str, servers: &[&str]) -> String {
        let mut report = format!(
            "Status: cluster member\nCluster ID: 9f8e (9f8e)\nLeader: {}\nServers:\n",
            leader
        );
        for server in servers {
            report.push_str("    ");
            report.push_str(server);
            report.push('\n');
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_output_shape() {
        let output: Value = serde_json::from_str(&query_output(
            &["name", "_uuid"],
            vec![vec![json!("br-int"), uuid("1234")]],
        ))
        .unwrap();
        assert_eq!(
            output,
            json!({"headings": ["name", "_uuid"], "data": [["br-int", ["uuid", "1234"]]]})
        );
    }

    #[test]
    fn test_tagged_builders() {
        assert_eq!(set(vec![json!(1)]), json!(["set", [1]]));
        assert_eq!(map(&[("a", "b")]), json!(["map", [["a", "b"]]]));
        assert_eq!(map(&[]), json!(["map", []]));
    }

    #[test]
    fn test_cluster_report() {
        let report = status_fixtures::cluster_report("self", &["srv-1", "srv-2"]);
        assert!(report.contains("Leader: self\n"));
        assert!(report.ends_with("Servers:\n    srv-1\n    srv-2\n"));
    }
}
