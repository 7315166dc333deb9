//! Query builder for the store's query endpoint.
//!
//! The store supports equality/range filters on single fields, one
//! order-by, and a result limit. Filters on different fields combine with
//! AND semantics.

use serde::Serialize;
use serde_json::Value;

/// Comparison operator for a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Sort direction for [`OrderBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

/// One field comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    pub field: String,
    pub op: Op,
    pub value: Value,
}

/// Single-field ordering.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// A query against one collection.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Query {
    /// Start an empty query (matches every document in the collection).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter clause.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    /// Set the ordering field and direction.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Cap the number of returned documents.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Cache key for this query, stable across identical builds.
    #[must_use]
    pub fn cache_key(&self, collection: &str) -> String {
        let filters = self
            .filters
            .iter()
            .map(|f| format!("{}{:?}{}", f.field, f.op, f.value))
            .collect::<Vec<_>>()
            .join(",");
        let order = self.order_by.as_ref().map_or_else(String::new, |o| {
            format!("{}{:?}", o.field, o.direction)
        });
        format!("{collection}?{filters}|{order}|{:?}", self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let query = Query::new()
            .filter("owner_id", Op::Eq, "u-1")
            .filter("quantity", Op::Gte, 1)
            .order_by("created_at", Direction::Desc)
            .limit(50);

        let wire = serde_json::to_value(&query).expect("serialize");
        assert_eq!(
            wire,
            json!({
                "filters": [
                    {"field": "owner_id", "op": "eq", "value": "u-1"},
                    {"field": "quantity", "op": "gte", "value": 1}
                ],
                "order_by": {"field": "created_at", "direction": "desc"},
                "limit": 50
            })
        );
    }

    #[test]
    fn test_empty_query_omits_optional_fields() {
        let wire = serde_json::to_value(Query::new()).expect("serialize");
        assert_eq!(wire, json!({"filters": []}));
    }

    #[test]
    fn test_cache_key_distinguishes_queries() {
        let all = Query::new().filter("is_available", Op::Eq, true);
        let one = Query::new()
            .filter("is_available", Op::Eq, true)
            .filter("category_id", Op::Eq, "c-1");
        assert_ne!(all.cache_key("foods"), one.cache_key("foods"));
    }
}
