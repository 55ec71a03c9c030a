//! Output rendering
//!
//! Writes command results as an ASCII table, JSON or YAML.

use super::Output;
use crate::resource::{Cell, Projection};
use anyhow::Result;
use clap::ValueEnum;
use serde_json::{Map, Value};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// Placeholder for absent and null values in tables
pub const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Write `output` to `out` in `format`
pub fn render<W: Write>(output: &Output, format: OutputFormat, out: &mut W) -> Result<()> {
    let projection = match output {
        Output::Nothing => return Ok(()),
        Output::List(p) | Output::Show(p) => p,
    };

    match format {
        OutputFormat::Table => {
            let table = match output {
                Output::Show(_) => show_table(projection),
                _ => list_table(projection),
            };
            out.write_all(table.as_bytes())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &structured(output, projection))?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut *out, &structured(output, projection))?;
        }
    }

    Ok(())
}

/// Display text of a cell
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn structured(output: &Output, projection: &Projection) -> Value {
    let object = |row: &Vec<Cell>| -> Value {
        let map: Map<String, Value> = projection
            .headers
            .iter()
            .zip(row)
            .map(|(h, c)| (h.clone(), c.clone().unwrap_or(Value::Null)))
            .collect();
        Value::Object(map)
    };

    match output {
        Output::Show(_) => projection.rows.first().map(object).unwrap_or(Value::Null),
        _ => Value::Array(projection.rows.iter().map(object).collect()),
    }
}

fn list_table(projection: &Projection) -> String {
    let rows: Vec<Vec<String>> = projection
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    draw(&projection.headers, &rows)
}

fn show_table(projection: &Projection) -> String {
    let headers = vec!["Field".to_string(), "Value".to_string()];
    let rows: Vec<Vec<String>> = match projection.rows.first() {
        Some(row) => projection
            .headers
            .iter()
            .zip(row)
            .map(|(h, c)| vec![h.clone(), cell_text(c)])
            .collect(),
        None => Vec::new(),
    };
    draw(&headers, &rows)
}

fn draw(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = format!(
        "+{}+\n",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let text = cells.get(i).map(String::as_str).unwrap_or("");
                format!(" {}{} ", text, " ".repeat(w - text.width()))
            })
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let mut table = String::new();
    table.push_str(&border);
    table.push_str(&line(headers));
    table.push_str(&border);
    for row in rows {
        table.push_str(&line(row));
    }
    if !rows.is_empty() {
        table.push_str(&border);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn projection() -> Projection {
        Projection {
            headers: vec!["ID".into(), "Region Name".into()],
            rows: vec![
                vec![Some(json!("p1")), Some(json!("RegionOne"))],
                vec![Some(json!("p2")), None],
            ],
        }
    }

    fn render_to_string(output: &Output, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        render(output, format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_table_layout() {
        let text = render_to_string(&Output::List(projection()), OutputFormat::Table);
        let expected = "\
+----+-------------+
| ID | Region Name |
+----+-------------+
| p1 | RegionOne   |
| p2 | -           |
+----+-------------+
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_show_table_is_field_value_pairs() {
        let show = Output::Show(Projection {
            headers: vec!["id".into(), "status".into()],
            rows: vec![vec![Some(json!("J1")), Some(json!("NEW"))]],
        });
        let text = render_to_string(&show, OutputFormat::Table);
        assert!(text.contains("| Field  | Value |"));
        assert!(text.contains("| status | NEW   |"));
    }

    #[test]
    fn test_json_list_keys_by_header() {
        let text = render_to_string(&Output::List(projection()), OutputFormat::Json);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!([
                {"ID": "p1", "Region Name": "RegionOne"},
                {"ID": "p2", "Region Name": null}
            ])
        );
    }

    #[test]
    fn test_yaml_show_is_a_mapping() {
        let show = Output::Show(Projection {
            headers: vec!["id".into()],
            rows: vec![vec![Some(json!("J1"))]],
        });
        let text = render_to_string(&show, OutputFormat::Yaml);
        assert_eq!(text.trim(), "id: J1");
    }

    #[test]
    fn test_nothing_renders_nothing() {
        let text = render_to_string(&Output::Nothing, OutputFormat::Table);
        assert!(text.is_empty());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&None), "-");
        assert_eq!(cell_text(&Some(Value::Null)), "-");
        assert_eq!(cell_text(&Some(json!(3))), "3");
        assert_eq!(cell_text(&Some(json!("x"))), "x");
    }

    #[test]
    fn test_wide_characters_are_padded_by_display_width() {
        let p = Projection {
            headers: vec!["Name".into()],
            rows: vec![vec![Some(json!("区域"))]],
        };
        let text = render_to_string(&Output::List(p), OutputFormat::Table);
        assert!(text.contains("| 区域 |"));
    }
}
