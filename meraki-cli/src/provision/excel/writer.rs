//! Write results back into the workbook and save it

use std::path::Path;

use anyhow::{Context, Result};
use calamine::Data;
use rust_xlsxwriter::{Format, Worksheet};

use crate::provision::types::{FirewallRule, NetworkObject, NetworkObjectGroup};

use super::workbook::{Sheet, Workbook};
use super::{HEADER_ROW, SheetRecords, headers};

/// Fill in any empty header cell of a tab's layout
fn ensure_headers(sheet: &mut Sheet, labels: &[&str]) {
    for (col, label) in labels.iter().enumerate() {
        if sheet.cell_string(HEADER_ROW, col as u16).trim().is_empty() {
            sheet.set_string(HEADER_ROW, col as u16, *label);
        }
    }
}

/// Emit `cells` into successive columns of `row`, starting at column A
fn write_row(sheet: &mut Sheet, row: u32, cells: Vec<String>) {
    for (col, value) in cells.into_iter().enumerate() {
        sheet.set_string(row, col as u16, value);
    }
}

pub fn write_network_objects(sheet: &mut Sheet, objects: &SheetRecords<NetworkObject>) {
    ensure_headers(sheet, &headers::NETWORK_OBJECTS);
    for (row, object) in objects.iter() {
        write_row(sheet, row, object.to_cells());
    }
}

pub fn write_network_object_groups(sheet: &mut Sheet, groups: &SheetRecords<NetworkObjectGroup>) {
    ensure_headers(sheet, &headers::NETWORK_OBJECT_GROUPS);
    for (row, group) in groups.iter() {
        write_row(sheet, row, group.to_cells());
    }
}

/// Write rules and, for rows that failed to parse, their reason into the
/// error column. Rejected rows keep their original cells.
pub fn write_firewall_rules(
    sheet: &mut Sheet,
    rules: &SheetRecords<FirewallRule>,
    rejected: &SheetRecords<String>,
) {
    ensure_headers(sheet, &headers::FIREWALL_RULES);
    for (row, rule) in rules.iter() {
        write_row(sheet, row, rule.to_cells());
    }
    let error_col = (headers::FIREWALL_RULES.len() - 1) as u16;
    for (row, reason) in rejected.iter() {
        sheet.set_string(row, error_col, reason.as_str());
    }
}

/// Save every sheet of `workbook` to an .xlsx file
pub fn write_workbook<P: AsRef<Path>>(workbook: &Workbook, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut output = rust_xlsxwriter::Workbook::new();
    let formats = DateFormats::new();

    for sheet in workbook.sheets() {
        let worksheet = output.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .with_context(|| format!("Invalid sheet name: {}", sheet.name))?;

        for (row_idx, row) in sheet.rows().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(worksheet, row_idx as u32, col_idx as u16, cell, &formats)?;
            }
        }
    }

    output
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    Ok(())
}

/// Number formats that make Excel (and calamine) read a serial back as a date
struct DateFormats {
    date: Format,
    datetime: Format,
    duration: Format,
}

impl DateFormats {
    fn new() -> Self {
        DateFormats {
            date: Format::new().set_num_format("yyyy-mm-dd"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            duration: Format::new().set_num_format("[h]:mm:ss"),
        }
    }

    fn for_cell(&self, dt: &calamine::ExcelDateTime) -> &Format {
        if dt.is_duration() {
            &self.duration
        } else if dt.as_f64().fract() == 0.0 {
            &self.date
        } else {
            &self.datetime
        }
    }
}

fn write_cell(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Data,
    formats: &DateFormats,
) -> Result<()> {
    match cell {
        Data::Empty | Data::Error(_) => {}
        Data::String(s) if s.is_empty() => {}
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            ws.write_string(row, col, s)?;
        }
        Data::Int(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        Data::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        // The source number format is not available, only date vs duration
        Data::DateTime(dt) => {
            ws.write_number_with_format(row, col, dt.as_f64(), formats.for_cell(dt))?;
        }
        Data::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}
