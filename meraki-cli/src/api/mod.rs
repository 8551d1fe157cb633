//! Meraki Dashboard API Module
//!
//! A small client for the handful of organization and network endpoints the
//! provisioning pipeline needs: network objects, network object groups and
//! the appliance L3 firewall rule set.

pub mod client;
pub mod constants;
pub mod models;
pub mod operations;

#[cfg(test)]
pub mod testing;

pub use client::{MerakiApi, MerakiClient, list_network_object_groups, list_network_objects};
pub use models::{NetworkContext, RemoteNetworkObject, RemoteNetworkObjectGroup};
pub use operations::{Operation, OperationResult};
