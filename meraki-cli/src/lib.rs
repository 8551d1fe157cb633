//! Spreadsheet-driven provisioning for Meraki network objects, object groups
//! and L3 firewall rules.

pub mod api;
pub mod cli;
pub mod config;
pub mod provision;
