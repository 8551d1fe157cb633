//! Record types, one per spreadsheet tab

pub mod firewall_rule;
pub mod network_object;
pub mod object_group;

pub use firewall_rule::{FirewallRule, Policy, Protocol, SYSLOG_ENABLED};
pub use network_object::{NetworkObject, ObjectKind};
pub use object_group::NetworkObjectGroup;
