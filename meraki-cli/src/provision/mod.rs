//! Spreadsheet-driven provisioning of Meraki firewall configuration
//!
//! Rows from the workbook become typed records ([`types`]), records become
//! request bodies ([`payload`]), the [`sequencer`] sends them one at a time
//! and writes ids or errors back onto the records, and [`excel`] puts the
//! results back into the workbook.

pub mod excel;
pub mod payload;
pub mod resolver;
pub mod run;
pub mod sequencer;
pub mod types;

pub use resolver::DuplicatePolicy;
pub use run::{RunOptions, RunReport, Sections, plan, run};
pub use sequencer::SectionSummary;
