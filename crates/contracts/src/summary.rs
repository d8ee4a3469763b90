//! Derived totals for whatever transaction list is currently in view.
//!
//! Totals are recomputed from scratch on every filter change. Volumes are
//! small, and a full O(n) rescan is simpler than maintaining running
//! aggregates under arbitrary filter combinations. Rounding happens at
//! render time only, so intermediate precision is kept.

use std::collections::BTreeMap;

use crate::payload::SalesRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub total_amount: f64,
    pub total_qty: f64,
}

pub fn summarize(records: &[SalesRecord]) -> Totals {
    let mut totals = Totals::default();
    for record in records {
        totals.total_amount += record.amount;
        totals.total_qty += record.qty;
    }
    totals
}

/// Sum amounts per dimension label, sorted by label for stable chart
/// ordering. Records with an empty label are skipped.
pub fn totals_by<F>(records: &[SalesRecord], key: F) -> Vec<(String, f64)>
where
    F: Fn(&SalesRecord) -> &str,
{
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        let label = key(record);
        if label.is_empty() {
            continue;
        }
        *buckets.entry(label.to_string()).or_default() += record.amount;
    }
    buckets.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{apply_filters, FilterSelection};
    use crate::payload::{Dashboard, Payload};
    use serde_json::json;

    #[test]
    fn empty_list_sums_to_zero() {
        assert_eq!(summarize(&[]), Totals::default());
    }

    #[test]
    fn filter_then_summarize_end_to_end() {
        // Payload with three rows across two channels, as seen on the wire.
        let payload: Payload = serde_json::from_value(json!({
            "raw_data": [
                { "CHANNEL": "Web",    "Amount": 10, "Qty": 1 },
                { "CHANNEL": "Retail", "Amount": 20, "Qty": 2 },
                { "channel": "Web",    "amount": 30, "qty": 3 }
            ]
        }))
        .unwrap();
        let dashboard = Dashboard::from_payload(payload);

        let all = summarize(&dashboard.raw_data);
        assert_eq!(all.total_amount, 60.0);
        assert_eq!(all.total_qty, 6.0);

        let web_only = apply_filters(
            &dashboard.raw_data,
            &FilterSelection {
                channel: Some("Web".into()),
                ..Default::default()
            },
        );
        assert_eq!(web_only.len(), 2);
        assert_eq!(summarize(&web_only).total_amount, 40.0);
    }

    #[test]
    fn non_numeric_fields_count_as_zero() {
        let payload: Payload = serde_json::from_value(json!({
            "raw_data": [
                { "channel": "Web", "amount": "oops", "qty": 2 },
                { "channel": "Web", "amount": 15.5 }
            ]
        }))
        .unwrap();
        let dashboard = Dashboard::from_payload(payload);
        let totals = summarize(&dashboard.raw_data);
        assert_eq!(totals.total_amount, 15.5);
        assert_eq!(totals.total_qty, 2.0);
    }

    #[test]
    fn totals_by_groups_and_sorts_labels() {
        let payload: Payload = serde_json::from_value(json!({
            "raw_data": [
                { "channel": "Web",    "amount": 10 },
                { "channel": "Retail", "amount": 20 },
                { "channel": "Web",    "amount": 30 },
                { "channel": "",       "amount": 99 }
            ]
        }))
        .unwrap();
        let dashboard = Dashboard::from_payload(payload);
        let series = totals_by(&dashboard.raw_data, |r| &r.channel);
        assert_eq!(
            series,
            vec![("Retail".to_string(), 20.0), ("Web".to_string(), 40.0)]
        );
    }
}
