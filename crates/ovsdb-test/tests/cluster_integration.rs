//! Cluster status integration tests
//!
//! Leadership checks across the two OVN databases of a three node cluster.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use ovsdb_cluster::{AppCtl, StatusValue};
use ovsdb_common::{ExecResult, OvsdbConfig};
use ovsdb_test::{status_fixtures, CommandVerifier, MockRunner};

fn cluster_runner() -> Arc<MockRunner> {
    Arc::new(
        MockRunner::new()
            .respond(
                "ovs-appctl",
                &["-t", "/var/run/openvswitch/ovnnb_db.ctl", "cluster/status"],
                ExecResult::ok(status_fixtures::NB_LEADER),
            )
            .respond(
                "ovs-appctl",
                &["-t", "/var/run/openvswitch/ovnsb_db.ctl", "cluster/status"],
                ExecResult::ok(status_fixtures::SB_FOLLOWER),
            )
            .respond(
                "ovs-appctl",
                &["-t", "ovn-northd", "status"],
                ExecResult::ok(status_fixtures::NORTHD_STANDBY),
            ),
    )
}

/// Scenario:
/// 1. This unit leads the Northbound cluster
/// 2. It follows in the Southbound cluster
/// 3. Its ovn-northd is on standby
#[test]
fn test_leadership_across_databases() {
    let runner = cluster_runner();
    let appctl = AppCtl::from_config(&OvsdbConfig::default(), Arc::clone(&runner));

    assert!(appctl.is_cluster_leader("ovnnb_db", None));
    assert!(!appctl.is_cluster_leader("ovnsb_db", None));
    assert!(!appctl.is_northd_active());

    CommandVerifier::new(&runner)
        .assert_sequence(&[
            "ovs-appctl -t /var/run/openvswitch/ovnnb_db.ctl cluster/status OVN_Northbound",
            "ovs-appctl -t /var/run/openvswitch/ovnsb_db.ctl cluster/status OVN_Southbound",
            "ovs-appctl -t ovn-northd status",
        ])
        .unwrap();
}

#[test]
fn test_minimal_report_record() {
    let runner = Arc::new(MockRunner::new().respond(
        "ovs-appctl",
        &[],
        ExecResult::ok(status_fixtures::cluster_report("self", &["srv-1", "srv-2"])),
    ));
    let appctl = AppCtl::from_config(&OvsdbConfig::default(), Arc::clone(&runner));

    let record = appctl.cluster_status("ovnnb_db", None).unwrap();
    assert_eq!(record.len(), 4);
    assert_eq!(record.text("status"), Some("cluster member"));
    assert_eq!(
        record.get("cluster_id"),
        Some(&StatusValue::Pair("9f8e".to_string(), "9f8e".to_string()))
    );
    assert_eq!(record.leader(), Some("self"));
    assert_eq!(
        record.get("servers"),
        Some(&StatusValue::List(vec![
            "srv-1".to_string(),
            "srv-2".to_string()
        ]))
    );
    assert!(appctl.is_cluster_leader("ovnnb_db", None));
}

#[test]
fn test_unreachable_daemon_is_not_leader_but_status_errors() {
    let runner = Arc::new(MockRunner::new().respond(
        "ovs-appctl",
        &[],
        ExecResult::failed(
            1,
            "2024-01-01T00:00:00Z|00001|unixctl|WARN|failed to connect to /var/run/openvswitch/ovnsb_db.ctl",
        ),
    ));
    let appctl = AppCtl::from_config(&OvsdbConfig::default(), Arc::clone(&runner));

    assert!(!appctl.is_cluster_leader("ovnsb_db", None));
    let err = appctl.cluster_status("ovnsb_db", None).unwrap_err();
    assert_eq!(err.exit_code(), Some(1));
}
