//! TableClient and bridge helper integration tests
//!
//! Drive the table and bridge APIs end to end through the mock runner,
//! using realistic `ovs-vsctl` output.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use ovsdb_common::{ExecResult, OvsdbConfig};
use ovsdb_table::{BridgeCtl, Row, TableClient};
use ovsdb_test::{fixtures::vsctl_fixtures, CommandVerifier, MockRunner};

fn bridges_runner() -> Arc<MockRunner> {
    Arc::new(MockRunner::new().respond(
        "ovs-vsctl",
        &["-f", "json", "find", "bridge"],
        ExecResult::ok(vsctl_fixtures::bridges()),
    ))
}

/// Scenario:
/// 1. List all bridges
/// 2. Pick out br-ex by name
/// 3. Tag it through `set` using its decoded uuid
#[test]
fn test_iterate_and_tag_bridge() {
    let runner = bridges_runner();
    let bridges = TableClient::with_runner("ovs-vsctl", "bridge", Arc::clone(&runner));

    let target: Vec<Row> = bridges
        .list()
        .unwrap()
        .filter(|br| br.get_str("name") == Some("br-ex"))
        .collect();
    assert_eq!(target.len(), 1);

    let uuid = target[0].uuid().unwrap();
    bridges.set(uuid, "external_ids:charm", "managed").unwrap();

    CommandVerifier::new(&runner)
        .assert_sequence(&[
            "ovs-vsctl -f json find bridge",
            "ovs-vsctl set bridge 6b8e3c2a-9d41-4f7a-8e55-3c0b7a1f2e22 external_ids:charm=managed",
        ])
        .unwrap();
}

#[test]
fn test_decoded_columns() {
    let runner = bridges_runner();
    let bridges = TableClient::with_runner("ovs-vsctl", "bridge", Arc::clone(&runner));
    let rows: Vec<Row> = bridges.list().unwrap().collect();

    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec!["_uuid", "name", "ports", "external_ids", "protocols"]
        );
    }

    // set of uuids: payload kept, inner tagged pairs untouched
    assert_eq!(rows[0].get("ports"), Some(&json!([["uuid", "a1"], ["uuid", "a2"]])));
    // single-element set printed as a bare uuid
    assert_eq!(rows[1].get("ports"), Some(&json!("b1")));
    // map payload is a list of pairs
    assert_eq!(
        rows[2].get("external_ids"),
        Some(&json!([["charm-ovn-chassis", "managed"], ["owner", "ops"]]))
    );
    // scalar passes through
    assert_eq!(rows[2].get_str("protocols"), Some("OpenFlow13"));
}

#[test]
fn test_clear_and_remove_after_find() {
    let runner = Arc::new(MockRunner::new().respond(
        "ovs-vsctl",
        &["-f", "json", "find", "port", "name=eth1"],
        ExecResult::ok(vsctl_fixtures::port_eth1()),
    ));
    let ports = TableClient::with_runner("ovs-vsctl", "port", Arc::clone(&runner));

    for port in ports.find("name=eth1").unwrap() {
        let uuid = port.uuid().unwrap();
        ports.remove(uuid, "external_ids", "charm-ovn-chassis").unwrap();
        ports.clear(uuid, "tag").unwrap();
    }

    CommandVerifier::new(&runner)
        .assert_sequence(&[
            "ovs-vsctl -f json find port name=eth1",
            "ovs-vsctl remove port 5c7a0e4d-1111-4222-8333-944455556666 external_ids charm-ovn-chassis",
            "ovs-vsctl clear port 5c7a0e4d-1111-4222-8333-944455556666 tag",
        ])
        .unwrap();
}

#[test]
fn test_find_no_match_is_empty_not_error() {
    let runner = Arc::new(MockRunner::new().respond(
        "ovn-nbctl",
        &["-f", "json", "find"],
        ExecResult::ok(r#"{"data":[],"headings":["_uuid","name"]}"#),
    ));
    let switches = TableClient::with_runner("ovn-nbctl", "logical_switch", Arc::clone(&runner));
    assert_eq!(switches.find("name=nope").unwrap().count(), 0);
}

#[test]
fn test_add_port_tags_row_found_by_name() {
    let runner = Arc::new(MockRunner::new().respond(
        "ovs-vsctl",
        &["-f", "json", "find", "port"],
        ExecResult::ok(vsctl_fixtures::port_eth1()),
    ));
    let ctl = BridgeCtl::from_config(&OvsdbConfig::default(), Arc::clone(&runner));

    ctl.add_br("br-ex", Some(("charm-ovn-chassis", "managed")))
        .unwrap();
    ctl.add_port("br-ex", "eth1", Some(("charm-ovn-chassis", "br-ex")))
        .unwrap();

    let verifier = CommandVerifier::new(&runner);
    verifier
        .assert_ran(
            "ovs-vsctl set port 5c7a0e4d-1111-4222-8333-944455556666 \
             external_ids:charm-ovn-chassis=br-ex",
        )
        .unwrap();
    verifier.assert_call_count(5).unwrap();
    verifier.assert_not_run("ovs-appctl").unwrap();
}
