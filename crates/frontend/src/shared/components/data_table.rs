//! Generic schema-on-read table.
//!
//! Columns are derived from the field names of the first row. All rows are
//! expected to share one field set (guaranteed for normalized raw data,
//! documented for upstream aggregate tables); fields absent from a row
//! render as empty cells.

use contracts::payload::AggregateRow;
use leptos::prelude::*;
use serde_json::Value;

use crate::shared::format::{format_int, format_money};

/// Column set of a row list: the first row's field names, in order.
pub fn table_columns(rows: &[AggregateRow]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Header label convention: underscores to spaces, upper-cased.
/// "part_number" -> "PART NUMBER".
pub fn header_label(field: &str) -> String {
    field.replace('_', " ").to_uppercase()
}

/// Cell text for one JSON value. Whole numbers drop the decimals, fractional
/// numbers render as money (two decimals). Null renders empty, never "null".
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            let v = n.as_f64().unwrap_or(0.0);
            if v.fract() == 0.0 {
                format_int(v)
            } else {
                format_money(v)
            }
        }
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Generic record table. An empty list renders an explicit empty-state row,
/// distinguishable from the pre-load state (where the table is not mounted
/// at all).
#[component]
pub fn DataTable(
    /// Rows to render; all rows share the first row's field set
    #[prop(into)]
    rows: Signal<Vec<AggregateRow>>,
    /// Text for the empty-state row
    #[prop(optional)]
    empty_text: Option<&'static str>,
) -> impl IntoView {
    let empty_text = empty_text.unwrap_or("No data");

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    {move || {
                        table_columns(&rows.get())
                            .into_iter()
                            .map(|field| view! { <th>{header_label(&field)}</th> })
                            .collect_view()
                    }}
                </tr>
            </thead>
            <tbody>
                {move || {
                    let data = rows.get();
                    if data.is_empty() {
                        view! {
                            <tr class="data-table__empty">
                                <td>{empty_text}</td>
                            </tr>
                        }
                        .into_any()
                    } else {
                        let columns = table_columns(&data);
                        data.into_iter()
                            .map(|row| {
                                let cells = columns
                                    .iter()
                                    .map(|field| {
                                        let text = row
                                            .get(field)
                                            .map(cell_text)
                                            .unwrap_or_default();
                                        view! { <td>{text}</td> }
                                    })
                                    .collect_view();
                                view! { <tr>{cells}</tr> }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn rows(value: Value) -> Vec<AggregateRow> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => map,
                    _ => Map::new(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn columns_come_from_the_first_row() {
        let data = rows(json!([
            { "category": "Bearings", "total": 120.5 },
            { "category": "Seals", "total": 80.0 }
        ]));
        assert_eq!(table_columns(&data), vec!["category", "total"]);
        assert!(table_columns(&[]).is_empty());
    }

    #[test]
    fn header_labels_are_upper_cased_with_spaces() {
        assert_eq!(header_label("part_number"), "PART NUMBER");
        assert_eq!(header_label("channel"), "CHANNEL");
    }

    #[test]
    fn cell_text_never_shows_null() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!("Web")), "Web");
        assert_eq!(cell_text(&json!(1234.5)), "1 234.50");
        assert_eq!(cell_text(&json!(7.0)), "7");
    }
}
