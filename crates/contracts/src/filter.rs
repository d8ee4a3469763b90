//! Client-side filter state for the raw transaction view.
//!
//! The filtered view is always recomputed from the authoritative raw list,
//! never from a previously filtered subset, so stale filters cannot compound.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::payload::SalesRecord;

/// The user-chosen constraints. `None` means "ALL" / unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub channel: Option<String>,
    pub part_number: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.channel.is_none()
            && self.part_number.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Number of set selectors, shown as the filter badge.
    pub fn active_count(&self) -> usize {
        [
            self.channel.is_some(),
            self.part_number.is_some(),
            self.date_from.is_some(),
            self.date_to.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// Distinct selector values observed in the current raw list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub channels: Vec<String>,
    pub parts: Vec<String>,
}

/// Extract sorted distinct channels and part numbers. Empty values (the
/// normalized form of null/missing source fields) are excluded.
pub fn filter_options(records: &[SalesRecord]) -> FilterOptions {
    FilterOptions {
        channels: distinct(records.iter().map(|r| r.channel.as_str())),
        parts: distinct(records.iter().map(|r| r.part_number.as_str())),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Apply the selection to the raw list. Predicates are conjunctive and run
/// in a fixed order: channel, part number, date >= from, date <= to. Unset
/// selectors skip their predicate.
pub fn apply_filters(records: &[SalesRecord], selection: &FilterSelection) -> Vec<SalesRecord> {
    records
        .iter()
        .filter(|record| matches(record, selection))
        .cloned()
        .collect()
}

fn matches(record: &SalesRecord, selection: &FilterSelection) -> bool {
    if let Some(channel) = &selection.channel {
        if &record.channel != channel {
            return false;
        }
    }
    if let Some(part) = &selection.part_number {
        if &record.part_number != part {
            return false;
        }
    }
    // Records without a parseable date never match a date bound.
    if let Some(from) = selection.date_from {
        match record.date {
            Some(date) if date >= from => {}
            _ => return false,
        }
    }
    if let Some(to) = selection.date_to {
        match record.date {
            Some(date) if date <= to => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, part: &str, channel: &str, amount: f64) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            part_number: part.to_string(),
            category: String::new(),
            sub_category: String::new(),
            channel: channel.to_string(),
            sales_exec: String::new(),
            qty: 1.0,
            amount,
        }
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record("2024-01-10", "PN-1", "Web", 10.0),
            record("2024-02-10", "PN-2", "Retail", 20.0),
            record("2024-03-10", "PN-1", "Web", 30.0),
        ]
    }

    #[test]
    fn empty_selection_returns_everything() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSelection::default());
        assert_eq!(filtered, records);
    }

    #[test]
    fn recompute_is_idempotent() {
        let records = sample();
        let selection = FilterSelection {
            channel: Some("Web".into()),
            ..Default::default()
        };
        let once = apply_filters(&records, &selection);
        let twice = apply_filters(&records, &selection);
        assert_eq!(once, twice);
    }

    #[test]
    fn predicates_combine_conjunctively() {
        let records = sample();
        let selection = FilterSelection {
            channel: Some("Web".into()),
            part_number: Some("PN-1".into()),
            date_from: NaiveDate::from_ymd_opt(2024, 2, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 12, 31),
        };
        let filtered = apply_filters(&records, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].amount, 30.0);
    }

    #[test]
    fn channel_filter_selects_matching_rows() {
        let records = sample();
        let selection = FilterSelection {
            channel: Some("Web".into()),
            ..Default::default()
        };
        let filtered = apply_filters(&records, &selection);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.channel == "Web"));
    }

    #[test]
    fn date_bounds_exclude_records_without_a_date() {
        let mut records = sample();
        records.push(record("bad", "PN-3", "Web", 99.0));
        let unbounded = apply_filters(&records, &FilterSelection::default());
        assert_eq!(unbounded.len(), 4);

        let bounded = apply_filters(
            &records,
            &FilterSelection {
                date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
                ..Default::default()
            },
        );
        assert!(bounded.iter().all(|r| r.date.is_some()));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let selection = FilterSelection {
            channel: Some("Web".into()),
            ..Default::default()
        };
        assert!(apply_filters(&[], &selection).is_empty());
    }

    #[test]
    fn options_are_distinct_sorted_and_skip_empty() {
        let records = vec![
            record("2024-01-01", "PN-9", "B", 1.0),
            record("2024-01-02", "", "", 1.0), // normalized null
            record("2024-01-03", "PN-1", "A", 1.0),
            record("2024-01-04", "PN-9", "B", 1.0),
        ];
        let options = filter_options(&records);
        assert_eq!(options.channels, vec!["A", "B"]);
        assert_eq!(options.parts, vec!["PN-1", "PN-9"]);
    }

    #[test]
    fn reset_matches_the_empty_selection() {
        let records = sample();
        let reset = FilterSelection::default();
        assert!(reset.is_empty());
        assert_eq!(reset.active_count(), 0);
        assert_eq!(apply_filters(&records, &reset), records);
    }
}
