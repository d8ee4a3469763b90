//! Wire payload and its normalized in-memory form.
//!
//! The backend stores one JSON document per dashboard load. Raw transaction
//! rows inside it come from spreadsheet exports with inconsistent key naming
//! (`CHANNEL` vs `channel`, `Part Number` vs `part_number`), so every row is
//! normalized exactly once, here, into [`SalesRecord`]. Downstream code never
//! does ad-hoc key lookups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pre-aggregated KPI scalars, produced upstream and consumed read-only.
/// Every field is optional; a missing value renders as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    #[serde(default)]
    pub total_sales: Option<f64>,
    #[serde(default)]
    pub total_qty: Option<f64>,
    #[serde(default)]
    pub mtd_sales: Option<f64>,
    #[serde(default)]
    pub growth_pct: Option<f64>,
    #[serde(default)]
    pub top_category: Option<String>,
    #[serde(default)]
    pub best_channel: Option<String>,
}

/// One row of a pre-aggregated table. Schema-less from the consumer's point
/// of view: whatever fields are present get rendered.
pub type AggregateRow = Map<String, Value>;

/// The single JSON document the backend returns for one dashboard load.
/// Every section is optional in the source; absent sections become empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub kpi: Option<KpiSummary>,
    #[serde(default)]
    pub category_performance: Vec<AggregateRow>,
    #[serde(default)]
    pub channel_performance: Vec<AggregateRow>,
    #[serde(default)]
    pub executive_performance: Vec<AggregateRow>,
    #[serde(default)]
    pub raw_data: Vec<Map<String, Value>>,
}

/// Canonical transaction record.
///
/// `date` is `None` when the source value was missing or unparseable; such
/// rows stay visible in the unfiltered view but are excluded once a date
/// bound is applied. `qty`/`amount` fall back to `0.0` for missing or
/// non-numeric source values rather than failing the whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: Option<NaiveDate>,
    pub part_number: String,
    pub category: String,
    pub sub_category: String,
    pub channel: String,
    pub sales_exec: String,
    pub qty: f64,
    pub amount: f64,
}

impl SalesRecord {
    /// Build a record from a raw string-keyed row, tolerating the key-naming
    /// variance of the source exports.
    pub fn from_raw(row: &Map<String, Value>) -> Self {
        Self {
            date: date_field(row, "date"),
            part_number: string_field(row, "part_number"),
            category: string_field(row, "category"),
            sub_category: string_field(row, "sub_category"),
            channel: string_field(row, "channel"),
            sales_exec: string_field(row, "sales_executive"),
            qty: numeric_field(row, "qty"),
            amount: numeric_field(row, "amount"),
        }
    }

    /// Project the record into a display row with a fixed column order.
    /// All records produce the same field set, which is the invariant the
    /// schema-on-read table renderer relies on.
    pub fn to_row(&self) -> AggregateRow {
        let mut row = Map::new();
        row.insert(
            "date".into(),
            match self.date {
                Some(d) => Value::String(d.format("%Y-%m-%d").to_string()),
                None => Value::String(String::new()),
            },
        );
        row.insert("part_number".into(), Value::String(self.part_number.clone()));
        row.insert("category".into(), Value::String(self.category.clone()));
        row.insert("sub_category".into(), Value::String(self.sub_category.clone()));
        row.insert("channel".into(), Value::String(self.channel.clone()));
        row.insert("sales_exec".into(), Value::String(self.sales_exec.clone()));
        row.insert("qty".into(), json_number(self.qty));
        row.insert("amount".into(), json_number(self.amount));
        row
    }
}

/// Normalized payload held for the life of the page session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub kpi: KpiSummary,
    pub category_table: Vec<AggregateRow>,
    pub channel_table: Vec<AggregateRow>,
    pub exec_table: Vec<AggregateRow>,
    pub raw_data: Vec<SalesRecord>,
}

impl Dashboard {
    pub fn from_payload(payload: Payload) -> Self {
        Self {
            kpi: payload.kpi.unwrap_or_default(),
            category_table: payload.category_performance,
            channel_table: payload.channel_performance,
            exec_table: payload.executive_performance,
            raw_data: payload.raw_data.iter().map(SalesRecord::from_raw).collect(),
        }
    }
}

fn json_number(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Canonical key form: trimmed, lower-cased, spaces collapsed to underscores.
/// `"Part Number"`, `"part_number"` and `"PART NUMBER"` all match.
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}

fn field<'a>(row: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    row.iter()
        .find(|(key, _)| normalize_key(key) == name)
        .map(|(_, value)| value)
}

fn string_field(row: &Map<String, Value>, name: &str) -> String {
    match field(row, name) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn numeric_field(row: &Map<String, Value>, name: &str) -> f64 {
    match field(row, name) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn date_field(row: &Map<String, Value>, name: &str) -> Option<NaiveDate> {
    let Some(Value::String(s)) = field(row, name) else {
        return None;
    };
    // Accept plain dates and ISO datetimes ("2024-03-15T00:00:00Z").
    let date_part = s.split('T').next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn normalizes_spreadsheet_style_keys() {
        let row = as_map(json!({
            "Date": "2024-03-15",
            "Part Number": "PN-100",
            "Category": "Bearings",
            "Sub Category": "Radial",
            "CHANNEL": "Web",
            "Sales Executive": "Asha",
            "Qty": 3,
            "Amount": 120.5
        }));
        let record = SalesRecord::from_raw(&row);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(record.part_number, "PN-100");
        assert_eq!(record.channel, "Web");
        assert_eq!(record.sales_exec, "Asha");
        assert_eq!(record.qty, 3.0);
        assert_eq!(record.amount, 120.5);
    }

    #[test]
    fn normalizes_snake_case_keys() {
        let row = as_map(json!({
            "date": "2024-01-02T10:30:00Z",
            "part_number": "PN-200",
            "channel": "Retail",
            "sub_category": "Axial",
            "sales_executive": "Lee",
            "qty": "7",
            "amount": "1,250.00"
        }));
        let record = SalesRecord::from_raw(&row);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(record.part_number, "PN-200");
        assert_eq!(record.sub_category, "Axial");
        assert_eq!(record.qty, 7.0);
        assert_eq!(record.amount, 1250.0);
    }

    #[test]
    fn malformed_scalars_become_zero_not_errors() {
        let row = as_map(json!({
            "date": "not-a-date",
            "channel": "Web",
            "qty": "lots",
            "amount": null
        }));
        let record = SalesRecord::from_raw(&row);
        assert_eq!(record.date, None);
        assert_eq!(record.qty, 0.0);
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.part_number, "");
    }

    #[test]
    fn missing_payload_sections_default_to_empty() {
        let payload: Payload = serde_json::from_value(json!({
            "kpi": { "total_sales": 500.0 }
        }))
        .unwrap();
        let dashboard = Dashboard::from_payload(payload);
        assert_eq!(dashboard.kpi.total_sales, Some(500.0));
        assert_eq!(dashboard.kpi.top_category, None);
        assert!(dashboard.raw_data.is_empty());
        assert!(dashboard.category_table.is_empty());
        assert!(dashboard.channel_table.is_empty());
        assert!(dashboard.exec_table.is_empty());
    }

    #[test]
    fn display_rows_share_one_field_set() {
        let full = SalesRecord::from_raw(&as_map(json!({
            "date": "2024-05-01", "channel": "Web", "qty": 1, "amount": 10.0
        })));
        let sparse = SalesRecord::from_raw(&as_map(json!({})));
        let keys = |r: &SalesRecord| r.to_row().keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys(&full), keys(&sparse));
        assert_eq!(
            keys(&full),
            vec![
                "date",
                "part_number",
                "category",
                "sub_category",
                "channel",
                "sales_exec",
                "qty",
                "amount"
            ]
        );
    }
}
