//! In-memory workbook: every sheet of the input as a typed cell grid

use calamine::Data;

/// One worksheet, addressed by zero-based (row, col)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: Vec<Vec<Data>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    pub fn from_rows(name: impl Into<String>, cells: Vec<Vec<Data>>) -> Self {
        Sheet {
            name: name.into(),
            cells,
        }
    }

    /// Build a sheet of string cells, handy for headers and tests
    pub fn from_strings(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let cells = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| {
                        if s.is_empty() {
                            Data::Empty
                        } else {
                            Data::String(s.to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(name, cells)
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Data> {
        self.cells.get(row as usize)?.get(col as usize)
    }

    /// Cell rendered as a string; empty and error cells are ""
    pub fn cell_string(&self, row: u32, col: u16) -> String {
        self.cell(row, col).map(cell_to_string).unwrap_or_default()
    }

    /// Overwrite a cell with a string value, growing the grid as needed.
    /// An empty string clears the cell.
    pub fn set_string(&mut self, row: u32, col: u16, value: impl Into<String>) {
        let value = value.into();
        let (row, col) = (row as usize, col as usize);

        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let line = &mut self.cells[row];
        if line.len() <= col {
            line.resize(col + 1, Data::Empty);
        }
        line[col] = if value.is_empty() {
            Data::Empty
        } else {
            Data::String(value)
        };
    }

    /// Number of rows up to and including the last populated one
    pub fn row_count(&self) -> u32 {
        self.cells
            .iter()
            .rposition(|row| !is_blank(row))
            .map(|idx| idx as u32 + 1)
            .unwrap_or(0)
    }

    pub fn is_row_blank(&self, row: u32) -> bool {
        self.cells
            .get(row as usize)
            .map(|r| is_blank(r))
            .unwrap_or(true)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Data]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

/// All sheets of a workbook, in their original order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|c| cell_to_string(c).trim().is_empty())
}

/// Render any cell as the string the API would receive
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole numbers (ports typed as numbers) lose the ".0"
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}
