//! Backend-neutral query filters.
//!
//! A [`Filter`] describes which documents a list query matches without
//! committing to a storage engine. Field names are the document's public
//! (camelCase) names, e.g. `email`, `firstName`, `createdAt`, `isActive`.
//! Each backend translates the tree into its own query language; the
//! [`Filter::matches`] evaluator works directly on serialized JSON documents
//! and is what the in-memory backend uses.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Matches every document.
    #[default]
    All,
    /// Field equals the given value.
    Eq(String, Value),
    /// Case-insensitive literal substring match on a string field.
    Contains(String, String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains(field.into(), needle.into())
    }

    /// Conjunction of `self` and `other`. Both sides stay mandatory.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), f) => {
                left.push(f);
                Filter::And(left)
            }
            (f, Filter::And(mut right)) => {
                right.insert(0, f);
                Filter::And(right)
            }
            (left, right) => Filter::And(vec![left, right]),
        }
    }

    /// Evaluates the filter against a JSON object.
    ///
    /// Missing fields never match `Eq` or `Contains`. An empty `And` matches
    /// everything; an empty `Or` matches nothing.
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, expected) => doc.get(field).is_some_and(|v| v == expected),
            Filter::Contains(field, needle) => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|haystack| {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }),
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}
