//! Request payload builders
//!
//! Pure functions from records to the JSON bodies the Dashboard API expects.
//! No I/O happens here.

use serde_json::{Value, json};

use super::types::{FirewallRule, NetworkObject, NetworkObjectGroup, SYSLOG_ENABLED};

/// Body for `POST organizations/{orgId}/networkObjects`
pub fn network_object_payload(object: &NetworkObject) -> Value {
    json!({
        "name": object.name,
        "type": object.kind.to_string(),
        "value": object.value,
        "networkObjectGroupIds": [],
    })
}

/// Body for `POST organizations/{orgId}/networkObjectGroups/`.
///
/// Uses the group's resolved member ids; unresolved names are left out.
pub fn network_object_group_payload(group: &NetworkObjectGroup) -> Value {
    json!({
        "name": group.name,
        "networkObjectIds": group.member_ids,
    })
}

/// A single entry of the `rules` array
pub fn firewall_rule_payload(rule: &FirewallRule) -> Value {
    json!({
        "comment": rule.comment,
        "policy": rule.policy.to_string(),
        "protocol": rule.protocol.to_string(),
        "destPort": rule.dest_port,
        "destCidr": rule.dest_cidr,
        "srcPort": rule.src_port,
        "srcCidr": rule.src_cidr,
        "syslogEnabled": SYSLOG_ENABLED,
    })
}

/// Body for `PUT networks/{networkId}/appliance/firewall/l3FirewallRules`,
/// rules in the order given
pub fn firewall_rules_payload(rules: &[FirewallRule]) -> Value {
    let rules: Vec<Value> = rules.iter().map(firewall_rule_payload).collect();
    json!({ "rules": rules })
}
