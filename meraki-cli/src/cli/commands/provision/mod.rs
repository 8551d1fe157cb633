//! Provision network objects, groups and firewall rules from the workbook

mod handler;

pub use handler::handle_provision_command;
