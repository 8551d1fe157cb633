//! Excel I/O for the provisioning workbook
//!
//! Three tabs drive a run, each with a one-row header:
//! - "Network Object": name, type, value | id, error
//! - "Network Object Groups": name, member names | member ids, group id, unresolved names, error
//! - "Firewall Rule": policy, protocol, srcPort, srcCidr, destPort, destCidr, comment | error
//!
//! Columns right of `|` are written back after submission. Every other sheet
//! in the workbook is carried through to the output untouched.

mod reader;
mod workbook;
mod writer;

pub use reader::{
    FirewallRuleSheet, read_firewall_rules, read_network_object_groups, read_network_objects,
    read_workbook,
};
pub use workbook::{Sheet, Workbook, cell_to_string};
pub use writer::{
    write_firewall_rules, write_network_object_groups, write_network_objects, write_workbook,
};

/// Tab names
pub mod sheets {
    pub const NETWORK_OBJECTS: &str = "Network Object";
    pub const NETWORK_OBJECT_GROUPS: &str = "Network Object Groups";
    pub const FIREWALL_RULES: &str = "Firewall Rule";
}

/// Header row labels per tab, in column order
pub mod headers {
    pub const NETWORK_OBJECTS: [&str; 5] = ["name", "type", "value", "id", "error"];
    pub const NETWORK_OBJECT_GROUPS: [&str; 6] = [
        "name",
        "networkObjectNames",
        "networkObjectIds",
        "groupId",
        "unresolvedNames",
        "error",
    ];
    pub const FIREWALL_RULES: [&str; 8] = [
        "policy", "protocol", "srcPort", "srcCidr", "destPort", "destCidr", "comment", "error",
    ];
}

/// Zero-based row index of the header; data starts on the next row
pub const HEADER_ROW: u32 = 0;

/// Records read from one tab, each remembering the sheet row it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRecords<T> {
    pub rows: Vec<u32>,
    pub records: Vec<T>,
}

impl<T> SheetRecords<T> {
    pub fn new() -> Self {
        SheetRecords {
            rows: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, row: u32, record: T) {
        self.rows.push(row);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (sheet row, record) pairs
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.rows.iter().copied().zip(self.records.iter())
    }
}

impl<T> Default for SheetRecords<T> {
    fn default() -> Self {
        Self::new()
    }
}
