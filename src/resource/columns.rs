//! Column Projector
//!
//! Shapes resource dictionaries into header + row form for display. List
//! output projects over a fixed, caller-supplied column order; single
//! resources (show/create) project over whatever keys the server returned.

use serde_json::{Map, Value};

/// A projected cell. `None` means the resource had no such field.
pub type Cell = Option<Value>;

/// Display-name overrides, `(field, header)`
pub type Remap = [(&'static str, &'static str)];

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Header for `field`: its remapped display name, or the field name itself
pub fn header_for(field: &str, remap: &Remap) -> String {
    remap
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, header)| header.to_string())
        .unwrap_or_else(|| field.to_string())
}

/// Project many resources over `fields`, in that order.
///
/// Rows missing a field get a `None` cell in its position; no row is dropped.
/// Entries that are not JSON objects project to all-`None` rows.
pub fn project_columns(fields: &[&str], remap: &Remap, rows: &[Value]) -> Projection {
    let headers = fields.iter().map(|f| header_for(f, remap)).collect();
    let rows = rows
        .iter()
        .map(|row| fields.iter().map(|f| row.get(*f).cloned()).collect())
        .collect();

    Projection { headers, rows }
}

/// Project one resource over its own keys, sorted by field name.
pub fn project_one(resource: &Map<String, Value>, remap: &Remap) -> Projection {
    let mut fields: Vec<&String> = resource.keys().collect();
    fields.sort();

    Projection {
        headers: fields.iter().map(|f| header_for(f, remap)).collect(),
        rows: vec![fields.iter().map(|f| resource.get(*f).cloned()).collect()],
    }
}
