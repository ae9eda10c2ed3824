//! Reference expansion.
//!
//! Documents store bare file ids and other-entity ids. Before a document
//! leaves the service, [`Resolver::expand`] replaces (or attaches next to)
//! those ids the resolved descriptors, following the rules declared in
//! [`crate::catalog`]. Lookups for independent ids run concurrently and
//! results are reassembled in source order. A lookup that fails is logged
//! and treated as absent; expansion itself never fails.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use serde_json::{Value, json};
use tracing::warn;

use crate::catalog::{EntityKind, Expansion, FileClass, Missing, Reference, Shape, Target};
use crate::locator::LocatorStore;
use crate::models::gallery::{ids_from_value, single_id};
use crate::store::{Document, DocumentStore};

/// How file references are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `{id, filename, content}` from the content record.
    Inline,
    /// `{file_id, filename, url}` from the URL record, with root-relative
    /// URLs made absolute against `base` (`scheme://host`).
    Url { base: String },
}

/// Make a root-relative URL absolute. Anything else is returned unchanged.
pub fn absolutize(url: &str, base: &str) -> String {
    if url.starts_with('/') && !url.starts_with("//") {
        format!("{}{}", base.trim_end_matches('/'), url)
    } else {
        url.to_string()
    }
}

#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn DocumentStore>,
    locator: LocatorStore,
}

enum Outcome {
    Value(Value),
    PerItem(Vec<Value>),
}

impl Resolver {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            locator: LocatorStore::new(store.clone()),
            store,
        }
    }

    /// Expand every declared reference of `doc`.
    ///
    /// Boxed because entity references recurse into the referenced kind.
    pub fn expand<'a>(
        &'a self,
        kind: EntityKind,
        mut doc: Document,
        mode: &'a Resolution,
    ) -> BoxFuture<'a, Document> {
        async move {
            let rules = kind.expansions();
            let jobs = rules.iter().map(|rule| {
                let source = doc.get(rule.field).cloned().unwrap_or(Value::Null);
                self.run(rule, source, mode)
            });
            let outcomes = join_all(jobs).await;

            for (rule, outcome) in rules.iter().zip(outcomes) {
                apply(&mut doc, rule, outcome);
            }
            doc
        }
        .boxed()
    }

    /// Expand a page of documents, preserving their order.
    pub async fn expand_all(
        &self,
        kind: EntityKind,
        docs: Vec<Document>,
        mode: &Resolution,
    ) -> Vec<Document> {
        join_all(docs.into_iter().map(|doc| self.expand(kind, doc, mode))).await
    }

    async fn run(&self, rule: &Expansion, source: Value, mode: &Resolution) -> Outcome {
        match rule.shape {
            Shape::One => {
                let resolved = match single_id(&source) {
                    Some(id) => self.resolve(rule, &id, mode).await,
                    None => None,
                };
                Outcome::Value(resolved.unwrap_or(Value::Null))
            }
            Shape::Many => {
                let ids = ids_from_value(&source);
                Outcome::Value(self.resolve_list(rule, &ids, mode).await)
            }
            Shape::Nested { item_field } => {
                let items = source.as_array().map(Vec::as_slice).unwrap_or_default();
                let jobs = items.iter().map(|item| async move {
                    match item.get(item_field).and_then(single_id) {
                        Some(id) => self.resolve(rule, &id, mode).await.unwrap_or(Value::Null),
                        None => Value::Null,
                    }
                });
                Outcome::PerItem(join_all(jobs).await)
            }
            Shape::Collect { item_field } => {
                let ids: Vec<String> = source
                    .as_array()
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|item| match item {
                        Value::Object(obj) => obj.get(item_field).and_then(single_id),
                        other => single_id(other),
                    })
                    .collect();
                Outcome::Value(self.resolve_list(rule, &ids, mode).await)
            }
        }
    }

    async fn resolve_list(&self, rule: &Expansion, ids: &[String], mode: &Resolution) -> Value {
        let resolved = join_all(ids.iter().map(|id| self.resolve(rule, id, mode))).await;
        let items = match rule.on_missing {
            Missing::Null => resolved
                .into_iter()
                .map(|v| v.unwrap_or(Value::Null))
                .collect(),
            Missing::Drop => resolved.into_iter().flatten().collect(),
        };
        Value::Array(items)
    }

    async fn resolve(&self, rule: &Expansion, id: &str, mode: &Resolution) -> Option<Value> {
        match rule.reference {
            Reference::File(class) => self.resolve_file(rule.field, id, class, mode).await,
            Reference::Entity(kind) => self.resolve_entity(rule.field, kind, id, mode).await,
        }
    }

    /// Resolve one file id to its descriptor in the requested mode.
    pub async fn resolve_file(
        &self,
        field: &str,
        id: &str,
        class: FileClass,
        mode: &Resolution,
    ) -> Option<Value> {
        match mode {
            Resolution::Inline => match self.locator.get_content(id).await {
                Ok(record) => record.map(|r| {
                    json!({
                        "id": r.id,
                        "filename": r.filename,
                        "content": r.content,
                    })
                }),
                Err(e) => {
                    warn!(field, file_id = id, error = %e, "File content lookup failed");
                    None
                }
            },
            Resolution::Url { base } => match self.locator.get_url(id).await {
                Ok(record) => record.map(|r| {
                    let mut descriptor = json!({
                        "file_id": r.file_id,
                        "filename": r.filename,
                        "url": absolutize(&r.url, base),
                    });
                    if class == FileClass::Video {
                        descriptor["type"] = Value::String("video".into());
                    }
                    descriptor
                }),
                Err(e) => {
                    warn!(field, file_id = id, error = %e, "File URL lookup failed");
                    None
                }
            },
        }
    }

    async fn resolve_entity(
        &self,
        field: &str,
        kind: EntityKind,
        id: &str,
        mode: &Resolution,
    ) -> Option<Value> {
        match self.store.get(kind.collection(), id).await {
            Ok(Some(doc)) => Some(Value::Object(self.expand(kind, doc, mode).await)),
            Ok(None) => None,
            Err(e) => {
                warn!(field, entity = %kind, id, error = %e, "Linked entity lookup failed");
                None
            }
        }
    }
}

fn apply(doc: &mut Document, rule: &Expansion, outcome: Outcome) {
    match outcome {
        Outcome::Value(value) => {
            let key = match rule.target {
                Target::InPlace => rule.field,
                Target::Attach(key) => key,
            };
            doc.insert(key.to_string(), value);
        }
        Outcome::PerItem(values) => {
            let Shape::Nested { item_field } = rule.shape else {
                return;
            };
            let key = match rule.target {
                Target::InPlace => item_field,
                Target::Attach(key) => key,
            };
            if let Some(Value::Array(items)) = doc.get_mut(rule.field) {
                for (item, value) in items.iter_mut().zip(values) {
                    if let Value::Object(obj) = item {
                        obj.insert(key.to_string(), value);
                    }
                }
            }
        }
    }
}
