use serde_json::Value;

use super::Document;

/// Containment filter over documents.
///
/// A document matches when [`json_contains`] holds for every field in the
/// pattern. This is the semantics of the PostgreSQL `jsonb @>` operator, so
/// the SQL backend can push the pattern down unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    /// Require the array at `field` to contain an element that contains `element`.
    pub fn contains_element(mut self, field: &str, element: Value) -> Self {
        match self.0.get_mut(field) {
            Some(Value::Array(items)) => items.push(element),
            _ => {
                self.0.insert(field.to_string(), Value::Array(vec![element]));
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pattern(&self) -> &Document {
        &self.0
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.0.iter().all(|(field, expected)| {
            doc.get(field)
                .is_some_and(|actual| json_contains(actual, expected))
        })
    }
}

/// Whether `target` contains `pattern`.
///
/// Objects contain every key of the pattern recursively; arrays contain a
/// pattern array when each pattern element is contained in some target
/// element; scalars must be equal.
pub fn json_contains(target: &Value, pattern: &Value) -> bool {
    match (target, pattern) {
        (Value::Object(target), Value::Object(pattern)) => pattern.iter().all(|(key, expected)| {
            target
                .get(key)
                .is_some_and(|actual| json_contains(actual, expected))
        }),
        (Value::Array(target), Value::Array(pattern)) => pattern
            .iter()
            .all(|expected| target.iter().any(|actual| json_contains(actual, expected))),
        _ => target == pattern,
    }
}
