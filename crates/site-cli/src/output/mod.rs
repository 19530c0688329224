use serde::Serialize;
use serde_json::Value;
use site_core::entities::Issue;
use site_dashboard::list_view::{self, ListQuery};
use site_dashboard::table::{TableOptions, render_table};

use crate::cli::OutputFormat;
use crate::ui;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    render_with(value, format, ui::table_options())
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print issues selected by `query`. Tables use the list view columns; JSON
/// output carries the same filtered, ordered records.
pub fn output_issues(issues: &[Issue], query: &ListQuery, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_issues(issues, query, format, ui::table_options())?);
    Ok(())
}

fn render_issues(
    issues: &[Issue],
    query: &ListQuery,
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(list_view::render(issues, query, options)),
        OutputFormat::Json | OutputFormat::Raw => {
            render_with(&list_view::select(issues, query), format, options)
        }
    }
}

fn render_with<T: Serialize>(
    value: &T,
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(serde_json::to_value(value)?, options),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

fn render_value_table(value: Value, options: TableOptions) -> anyhow::Result<String> {
    match value {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(render_table(&["key", "value"], &rows, options))
        }
        scalar => Ok(render_table(&["value"], &[vec![value_to_cell(&scalar)]], options)),
    }
}

fn render_array_table(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return render_table(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return String::from("(no columns)");
    }
    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    render_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
