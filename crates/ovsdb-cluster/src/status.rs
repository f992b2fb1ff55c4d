//! Parser for the `cluster/status` report of a clustered OVSDB server.
//!
//! The report is line oriented:
//!
//! ```text
//! Cluster ID: 9f8e (9f8e2c41-7a3b-4d25-b1e0-6c8f4a2d9e13)
//! Status: cluster member
//! Leader: self
//! Servers:
//!     a5e2 (a5e2 at ssl:10.0.0.11:6643) (self)
//!     7c1d (7c1d at ssl:10.0.0.12:6643)
//! ```
//!
//! `Key: value` lines become text fields, `Key:` lines open a list that the
//! following indented lines fill. `Cluster ID` and `Server ID` carry two
//! identifiers and become pairs. Keys are lowercased with spaces replaced by
//! underscores.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

/// Keys whose value is `<id> (<id>)`.
const PAIR_KEYS: [&str; 2] = ["cluster_id", "server_id"];

/// `leader` value reported by the leader itself.
pub const LEADER_SELF: &str = "self";

/// One field of a status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatusValue {
    /// `Key: value`
    Text(String),
    /// `Key:` followed by indented lines
    List(Vec<String>),
    /// `Cluster ID: a (b)` / `Server ID: a (b)`
    Pair(String, String),
}

impl StatusValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StatusValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            StatusValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&str, &str)> {
        match self {
            StatusValue::Pair(a, b) => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }
}

/// Parsed `cluster/status` report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusRecord {
    fields: BTreeMap<String, StatusValue>,
}

impl StatusRecord {
    /// Parses a report.
    ///
    /// Lines that are neither a field nor a continuation of an open list
    /// (the bare server id heading the report, blank lines) are skipped.
    pub fn parse(text: &str) -> Self {
        let mut record = StatusRecord::default();
        // Key of the most recently established field.
        let mut current: Option<String> = None;

        for line in text.lines() {
            if line.starts_with(char::is_whitespace) {
                if let Some(key) = current.as_deref() {
                    match record.fields.get_mut(key) {
                        Some(StatusValue::List(items)) => {
                            items.push(line.trim_start().to_string());
                        }
                        _ => trace!(key, line, "Ignoring continuation of non-list field"),
                    }
                    continue;
                }
            }

            let Some((raw_key, raw_value)) = line.split_once(':') else {
                continue;
            };
            let key = normalize_key(raw_key);
            let value = decode_value(&key, raw_value);
            record.fields.insert(key.clone(), value);
            current = Some(key);
        }

        record
    }

    pub fn get(&self, key: &str) -> Option<&StatusValue> {
        self.fields.get(key)
    }

    /// Text value of `key`, if it is a text field.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StatusValue::as_text)
    }

    /// List value of `key`, if it is a list field.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(StatusValue::as_list)
    }

    /// Pair value of `key`, if it is a pair field.
    pub fn pair(&self, key: &str) -> Option<(&str, &str)> {
        self.get(key).and_then(StatusValue::as_pair)
    }

    pub fn leader(&self) -> Option<&str> {
        self.text("leader")
    }

    /// True if the report was produced by the cluster leader.
    pub fn is_leader(&self) -> bool {
        self.leader() == Some(LEADER_SELF)
    }

    pub fn cluster_id(&self) -> Option<(&str, &str)> {
        self.pair("cluster_id")
    }

    pub fn server_id(&self) -> Option<(&str, &str)> {
        self.pair("server_id")
    }

    pub fn servers(&self) -> Option<&[String]> {
        self.list("servers")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatusValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_")
}

fn decode_value(key: &str, raw: &str) -> StatusValue {
    if raw.is_empty() {
        return StatusValue::List(Vec::new());
    }

    if PAIR_KEYS.contains(&key) {
        let cleaned = raw.replace(['(', ')'], "");
        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        if let [id, short] = parts.as_slice() {
            return StatusValue::Pair(id.to_string(), short.to_string());
        }
        trace!(key, raw, "Identifier field without two parts, keeping as text");
    }

    StatusValue::Text(raw.trim_start().to_string())
}
