//! Read the provisioning workbook and its three tabs

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::provision::types::{FirewallRule, NetworkObject, NetworkObjectGroup};

use super::workbook::{Sheet, Workbook};
use super::{HEADER_ROW, SheetRecords};

/// Column indices for the "Network Object" tab
mod object_cols {
    pub const NAME: u16 = 0;
    pub const TYPE: u16 = 1;
    pub const VALUE: u16 = 2;
}

/// Column indices for the "Network Object Groups" tab
mod group_cols {
    pub const NAME: u16 = 0;
    pub const MEMBERS: u16 = 1;
}

/// Column indices for the "Firewall Rule" tab
mod rule_cols {
    pub const POLICY: u16 = 0;
    pub const PROTOCOL: u16 = 1;
    pub const SRC_PORT: u16 = 2;
    pub const SRC_CIDR: u16 = 3;
    pub const DEST_PORT: u16 = 4;
    pub const DEST_CIDR: u16 = 5;
    pub const COMMENT: u16 = 6;
}

/// Load every sheet of an .xlsx file
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut result = Workbook::new();

    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        // The range starts at the first used cell, not at A1
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut cells: Vec<Vec<Data>> = vec![Vec::new(); start_row as usize];
        for row in range.rows() {
            let mut line = vec![Data::Empty; start_col as usize];
            line.extend(row.iter().cloned());
            cells.push(line);
        }

        log::debug!("Loaded sheet '{}' ({} rows)", sheet_name, cells.len());
        result.add_sheet(Sheet::from_rows(sheet_name, cells));
    }

    Ok(result)
}

fn data_rows(sheet: &Sheet) -> impl Iterator<Item = u32> + '_ {
    (HEADER_ROW + 1..sheet.row_count()).filter(move |row| !sheet.is_row_blank(*row))
}

/// Read the "Network Object" tab.
///
/// Rows missing a name, type or value are kept with their error set so the
/// failure shows up in the output, but they are never submitted.
pub fn read_network_objects(sheet: &Sheet) -> SheetRecords<NetworkObject> {
    let mut records = SheetRecords::new();

    for row in data_rows(sheet) {
        let mut object = NetworkObject::new(
            &sheet.cell_string(row, object_cols::NAME),
            sheet.cell_string(row, object_cols::TYPE).trim(),
            sheet.cell_string(row, object_cols::VALUE).trim(),
        );

        let missing = object.missing_fields();
        if !missing.is_empty() {
            object.error = Some(format!("missing required field(s): {}", missing.join(", ")));
        }

        records.push(row, object);
    }

    records
}

/// Read the "Network Object Groups" tab
pub fn read_network_object_groups(sheet: &Sheet) -> SheetRecords<NetworkObjectGroup> {
    let mut records = SheetRecords::new();

    for row in data_rows(sheet) {
        let mut group = NetworkObjectGroup::new(
            &sheet.cell_string(row, group_cols::NAME),
            &sheet.cell_string(row, group_cols::MEMBERS),
        );
        if group.name.is_empty() {
            group.error = Some("missing required field(s): name".to_string());
        }
        records.push(row, group);
    }

    records
}

/// Parsed "Firewall Rule" tab
#[derive(Debug, Clone, Default)]
pub struct FirewallRuleSheet {
    /// Valid rules in row order
    pub rules: SheetRecords<FirewallRule>,
    /// Rows whose policy or protocol could not be parsed, with the reason
    pub rejected: SheetRecords<String>,
}

impl FirewallRuleSheet {
    pub fn is_valid(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Read the "Firewall Rule" tab. Rows with an empty policy cell are skipped.
pub fn read_firewall_rules(sheet: &Sheet) -> FirewallRuleSheet {
    let mut result = FirewallRuleSheet::default();

    for row in data_rows(sheet) {
        let policy = sheet.cell_string(row, rule_cols::POLICY);
        if policy.trim().is_empty() {
            continue;
        }

        match parse_rule(sheet, row, &policy) {
            Ok(rule) => result.rules.push(row, rule),
            Err(e) => {
                log::warn!("Firewall rule on row {}: {:#}", row + 1, e);
                result.rejected.push(row, format!("{:#}", e));
            }
        }
    }

    result
}

fn parse_rule(sheet: &Sheet, row: u32, policy: &str) -> Result<FirewallRule> {
    Ok(FirewallRule {
        policy: policy.parse()?,
        protocol: sheet.cell_string(row, rule_cols::PROTOCOL).parse()?,
        src_port: sheet.cell_string(row, rule_cols::SRC_PORT),
        src_cidr: sheet.cell_string(row, rule_cols::SRC_CIDR),
        dest_port: sheet.cell_string(row, rule_cols::DEST_PORT),
        dest_cidr: sheet.cell_string(row, rule_cols::DEST_CIDR),
        comment: sheet.cell_string(row, rule_cols::COMMENT),
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::types::{ObjectKind, Policy, Protocol};

    #[test]
    fn test_read_network_objects() {
        let sheet = Sheet::from_strings(
            "Network Object",
            &[
                &["name", "type", "value"],
                &[" web ", "cidr", "10.0.0.0/24"],
                &[""],
                &["dns", "fqdn", "dns.example.com"],
                &["broken", "", ""],
            ],
        );

        let records = read_network_objects(&sheet);

        assert_eq!(records.rows, vec![1, 3, 4]);
        assert_eq!(records.records[0].name, "web");
        assert_eq!(records.records[1].kind, ObjectKind::Fqdn);
        assert!(records.records[1].error.is_none());
        assert_eq!(
            records.records[2].error.as_deref(),
            Some("missing required field(s): type, value")
        );
    }

    #[test]
    fn test_read_network_object_numeric_cells() {
        let sheet = Sheet::from_rows(
            "Network Object",
            vec![
                vec![Data::String("name".into())],
                vec![
                    Data::Float(42.0),
                    Data::String("other".into()),
                    Data::Int(7),
                ],
            ],
        );

        let records = read_network_objects(&sheet);

        assert_eq!(records.records[0].name, "42");
        assert_eq!(records.records[0].value, "7");
    }

    #[test]
    fn test_read_network_object_groups() {
        let sheet = Sheet::from_strings(
            "Network Object Groups",
            &[
                &["name", "members"],
                &["servers", "web, db"],
                &["", "web"],
            ],
        );

        let records = read_network_object_groups(&sheet);

        assert_eq!(records.len(), 2);
        assert_eq!(records.records[0].member_names, vec!["web", "db"]);
        assert!(records.records[1].error.is_some());
    }

    #[test]
    fn test_read_firewall_rules_skips_rows_without_policy() {
        let sheet = Sheet::from_strings(
            "Firewall Rule",
            &[
                &["policy", "protocol", "srcPort", "srcCidr", "destPort", "destCidr", "comment"],
                &["allow", "tcp", "any", "10.0.0.0/8", "443", "any", "https"],
                &["", "udp", "any", "any", "53", "any", "orphan"],
                &["Deny", "ANY", "any", "any", "any", "any", "default deny"],
            ],
        );

        let parsed = read_firewall_rules(&sheet);

        assert!(parsed.is_valid());
        assert_eq!(parsed.rules.rows, vec![1, 3]);
        let first = &parsed.rules.records[0];
        assert_eq!(first.policy, Policy::Allow);
        assert_eq!(first.protocol, Protocol::Tcp);
        assert_eq!(first.dest_port, "443");
        assert_eq!(first.comment, "https");
        assert_eq!(parsed.rules.records[1].policy, Policy::Deny);
    }

    #[test]
    fn test_read_firewall_rules_rejects_bad_values() {
        let sheet = Sheet::from_strings(
            "Firewall Rule",
            &[
                &["policy", "protocol"],
                &["allow", "tcp"],
                &["permit", "tcp"],
                &["deny", ""],
            ],
        );

        let parsed = read_firewall_rules(&sheet);

        assert!(!parsed.is_valid());
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rejected.rows, vec![2, 3]);
        assert!(parsed.rejected.records[0].contains("permit"));
        assert!(parsed.rejected.records[1].contains("protocol"));
    }
}
