//! Query - a backend-neutral description of a collection query.

use serde_json::Value;

/// A single field predicate. Field paths are dotted (`author.id`).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the value.
    Eq(String, Value),
    /// Field equals one of the values. An empty list is rejected by stores.
    In(String, Vec<Value>),
}

impl Filter {
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq(field, _) | Filter::In(field, _) => field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

/// Filtered, optionally ordered query over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: String,
    filters: Vec<Filter>,
    order: Option<OrderBy>,
}

impl Query {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.into(), value.into()));
        self
    }

    pub fn where_in<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filters.push(Filter::In(
            field.into(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Order results by a field. A later call replaces an earlier one.
    pub fn order_by(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.order = Some(OrderBy {
            field: field.into(),
            descending,
        });
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }
}

/// Resolve a dotted field path inside a document.
pub(crate) fn field_value<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}
