use crate::error::ExportError;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Render up to `max_rows` rows as a markdown table.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    println!("{}\n", render_table(rows, max_rows));
}

/// Key/value pairs such as distributions, rendered as a two-column table.
pub fn preview_pairs<K, V>(title: &str, headers: (&str, &str), pairs: &[(K, V)])
where
    K: ToString,
    V: ToString,
{
    let mut builder = tabled::builder::Builder::default();
    builder.push_record([headers.0, headers.1]);
    for (k, v) in pairs {
        builder.push_record([k.to_string(), v.to_string()]);
    }
    println!("{}\n", title);
    if pairs.is_empty() {
        println!("(no rows)\n");
        return;
    }
    println!("{}\n", builder.build().with(Style::markdown()));
}
