//! Request handlers
//!
//! Shared list helpers live here: the admin tables search by substring
//! across every stringified field of a row and paginate client-side over
//! the full result set, so the endpoints mirror that contract in memory.

pub mod auth;
pub mod awards;
pub mod brands;
pub mod dashboard;
pub mod health;
pub mod home_media;
pub mod honorees;
pub mod regionals;
pub mod units;
pub mod uploads;

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Hard cap on page size
pub const MAX_PAGE_SIZE: usize = 100;

/// Common query parameters for list endpoints
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    /// Substring searched across all stringified fields
    #[serde(default)]
    pub q: Option<String>,

    #[serde(default)]
    pub offset: Option<usize>,

    #[serde(default)]
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn page_bounds(&self) -> (usize, usize) {
        let offset = self.offset.unwrap_or(0);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (offset, limit)
    }
}

/// Envelope for list responses
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    /// Matching rows before pagination
    pub total: usize,
}

/// Case-insensitive substring match against every stringified field value
pub fn matches_query<T: Serialize>(item: &T, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let value = match serde_json::to_value(item) {
        Ok(value) => value,
        Err(_) => return false,
    };

    value_contains(&value, &needle)
}

fn value_contains(value: &serde_json::Value, needle: &str) -> bool {
    match value {
        serde_json::Value::String(s) => s.to_lowercase().contains(needle),
        serde_json::Value::Number(n) => n.to_string().contains(needle),
        serde_json::Value::Bool(b) => b.to_string() == needle,
        serde_json::Value::Array(items) => items.iter().any(|v| value_contains(v, needle)),
        serde_json::Value::Object(map) => map.values().any(|v| value_contains(v, needle)),
        serde_json::Value::Null => false,
    }
}

/// Search then page a fully fetched table
pub fn search_and_page<T: Serialize>(items: Vec<T>, query: &ListQuery) -> ListResponse<T> {
    let filtered: Vec<T> = match query.q.as_deref() {
        Some(q) if !q.trim().is_empty() => items
            .into_iter()
            .filter(|item| matches_query(item, q.trim()))
            .collect(),
        _ => items,
    };

    let total = filtered.len();
    let (offset, limit) = query.page_bounds();

    let items = filtered.into_iter().skip(offset).take(limit).collect();

    ListResponse { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: String,
        location: String,
        count: i32,
        nested: Vec<String>,
    }

    fn row(name: &str, location: &str, count: i32) -> Row {
        Row {
            name: name.to_string(),
            location: location.to_string(),
            count,
            nested: vec!["extra".to_string()],
        }
    }

    #[test]
    fn test_matches_query_across_fields() {
        let r = row("Campus Recife", "Recife, PE", 42);

        assert!(matches_query(&r, "recife"));
        assert!(matches_query(&r, "PE"));
        assert!(matches_query(&r, "42"));
        assert!(matches_query(&r, "extra"));
        assert!(!matches_query(&r, "manaus"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let r = row("A", "B", 1);
        assert!(matches_query(&r, ""));
    }

    #[test]
    fn test_search_and_page() {
        let rows = vec![
            row("Campus A", "Recife", 1),
            row("Campus B", "Natal", 2),
            row("Campus C", "Recife", 3),
        ];

        let result = search_and_page(
            rows,
            &ListQuery {
                q: Some("recife".to_string()),
                offset: None,
                limit: None,
            },
        );

        assert_eq!(result.total, 2);
        assert_eq!(result.items.len(), 2);
    }

    #[test]
    fn test_pagination_bounds() {
        let rows: Vec<Row> = (0..50).map(|i| row(&format!("R{}", i), "X", i)).collect();

        let result = search_and_page(
            rows,
            &ListQuery {
                q: None,
                offset: Some(45),
                limit: Some(10),
            },
        );

        assert_eq!(result.total, 50);
        assert_eq!(result.items.len(), 5);
    }

    #[test]
    fn test_page_size_clamped() {
        let query = ListQuery {
            q: None,
            offset: None,
            limit: Some(10_000),
        };
        assert_eq!(query.page_bounds(), (0, MAX_PAGE_SIZE));
    }
}
