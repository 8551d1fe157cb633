//! Show what already exists in the organization

mod handler;

pub use handler::handle_inventory_command;
