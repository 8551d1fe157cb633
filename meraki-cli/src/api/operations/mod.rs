//! Meraki Dashboard Operations Module
//!
//! Every request the tool makes is described by an [`Operation`] so that the
//! provisioning code can be driven against any [`crate::api::MerakiApi`].

pub mod operation;

pub use operation::{Operation, OperationResult};
