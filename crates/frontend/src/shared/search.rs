//! Free-text search over table rows (case-insensitive substring match).

use serde_json::{Map, Value};

/// True when any field of the row contains the query. An empty or
/// whitespace-only query matches everything.
pub fn row_matches(row: &Map<String, Value>, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    row.values().any(|value| {
        let text = match value {
            Value::String(s) => s.to_lowercase(),
            Value::Number(n) => n.to_string(),
            _ => return false,
        };
        text.contains(&query)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> Map<String, Value> {
        match json!({ "channel": "Web", "part_number": "PN-100", "amount": 120.5 }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(row_matches(&row(), ""));
        assert!(row_matches(&row(), "   "));
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(row_matches(&row(), "web"));
        assert!(row_matches(&row(), "pn-1"));
        assert!(!row_matches(&row(), "retail"));
    }

    #[test]
    fn numbers_match_by_their_text_form() {
        assert!(row_matches(&row(), "120.5"));
    }
}
