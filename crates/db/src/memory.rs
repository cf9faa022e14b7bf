//! In-process [`MovieCollection`] for tests, behind the `test-utils` feature.
//!
//! Interprets the subset of the query language that [`crate::query`]
//! produces: field equality, `$or`, `$regex` with `$options`, `$ne`, and the
//! `$match` / `$group` / `$sort` aggregation stages with `$sum`. Anything
//! else is ignored with a warning.

use std::cmp::Ordering;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use tokio::sync::RwLock;

use crate::collection::MovieCollection;
use crate::error::DbError;
use crate::query::as_i64;

/// Documents held in insertion order behind a single lock.
#[derive(Debug, Default)]
pub struct InMemoryMovieCollection {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryMovieCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents, regardless of shape.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl MovieCollection for InMemoryMovieCollection {
    async fn find(&self, filter: Document, sort: Document) -> Result<Vec<Document>, DbError> {
        let documents = self.documents.read().await;
        let mut found: Vec<Document> = documents
            .iter()
            .filter(|d| matches_filter(d, &filter))
            .cloned()
            .collect();
        sort_documents(&mut found, &sort);
        Ok(found)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, DbError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| has_id(d, id)).cloned())
    }

    async fn insert_one(&self, mut document: Document) -> Result<ObjectId, DbError> {
        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };
        self.documents.write().await.push(document);
        Ok(id)
    }

    async fn update_by_id(&self, id: ObjectId, set: Document) -> Result<u64, DbError> {
        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|d| has_id(d, id)) {
            Some(document) => {
                for (key, value) in set {
                    document.insert(key, value);
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, DbError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|d| !has_id(d, id));
        Ok((before - documents.len()) as u64)
    }

    async fn count(&self, filter: Document) -> Result<u64, DbError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| matches_filter(d, &filter))
            .count() as u64)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, DbError> {
        let mut rows = self.documents.read().await.clone();
        for stage in &pipeline {
            rows = apply_stage(rows, stage);
        }
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

fn has_id(document: &Document, id: ObjectId) -> bool {
    document.get_object_id("_id").ok() == Some(id)
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, condition)| {
        if key == "$or" {
            return match condition {
                Bson::Array(clauses) => clauses.iter().any(|clause| match clause {
                    Bson::Document(clause) => matches_filter(document, clause),
                    _ => false,
                }),
                _ => false,
            };
        }
        let value = document.get(key).unwrap_or(&Bson::Null);
        match condition {
            Bson::Document(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                matches_operators(value, ops)
            }
            expected => value == expected,
        }
    })
}

fn matches_operators(value: &Bson, ops: &Document) -> bool {
    ops.iter().all(|(op, operand)| match op.as_str() {
        "$regex" => matches_regex(value, operand, ops.get_str("$options").unwrap_or("")),
        "$options" => true,
        "$ne" => value != operand,
        other => {
            tracing::warn!(operator = other, "Unsupported query operator ignored");
            true
        }
    })
}

fn matches_regex(value: &Bson, pattern: &Bson, options: &str) -> bool {
    let (Bson::String(value), Bson::String(pattern)) = (value, pattern) else {
        return false;
    };
    regex::RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .build()
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

fn sort_documents(documents: &mut [Document], sort: &Document) {
    if sort.is_empty() {
        return;
    }
    documents.sort_by(|a, b| {
        for (field, direction) in sort {
            let left = a.get(field).unwrap_or(&Bson::Null);
            let right = b.get(field).unwrap_or(&Bson::Null);
            let ordering = compare_values(left, right);
            let ordering = if as_i64(Some(direction)) < 0 {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Cross-type ordering: null, then numbers, then strings, then dates.
fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::Null => 0,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => 1,
        Bson::String(_) => 2,
        Bson::ObjectId(_) => 3,
        Bson::DateTime(_) => 4,
        _ => 5,
    }
}

fn compare_values(left: &Bson, right: &Bson) -> Ordering {
    match (left, right) {
        (Bson::String(a), Bson::String(b)) => a.cmp(b),
        (Bson::DateTime(a), Bson::DateTime(b)) => a.cmp(b),
        (Bson::ObjectId(a), Bson::ObjectId(b)) => a.cmp(b),
        (a, b) if type_rank(a) == 1 && type_rank(b) == 1 => as_f64(a)
            .partial_cmp(&as_f64(b))
            .unwrap_or(Ordering::Equal),
        (a, b) => type_rank(a).cmp(&type_rank(b)),
    }
}

fn as_f64(value: &Bson) -> f64 {
    match value {
        Bson::Int32(v) => f64::from(*v),
        Bson::Int64(v) => *v as f64,
        Bson::Double(v) => *v,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn apply_stage(rows: Vec<Document>, stage: &Document) -> Vec<Document> {
    let Some((name, definition)) = stage.iter().next() else {
        return rows;
    };
    let Bson::Document(definition) = definition else {
        return rows;
    };
    match name.as_str() {
        "$match" => rows
            .into_iter()
            .filter(|row| matches_filter(row, definition))
            .collect(),
        "$group" => group_rows(&rows, definition),
        "$sort" => {
            let mut rows = rows;
            sort_documents(&mut rows, definition);
            rows
        }
        other => {
            tracing::warn!(stage = other, "Unsupported aggregation stage ignored");
            rows
        }
    }
}

/// Evaluate a `$group` expression: `"$field"` reads the field, anything
/// else is a literal.
fn evaluate(row: &Document, expression: &Bson) -> Bson {
    match expression {
        Bson::String(path) if path.starts_with('$') => {
            row.get(&path[1..]).cloned().unwrap_or(Bson::Null)
        }
        literal => literal.clone(),
    }
}

/// Running `$sum` that stays integral until a double is added.
#[derive(Default, Clone, Copy)]
struct Sum {
    int: i64,
    float: f64,
    is_float: bool,
}

impl Sum {
    fn add(&mut self, value: &Bson) {
        match value {
            Bson::Int32(v) => self.int += i64::from(*v),
            Bson::Int64(v) => self.int += *v,
            Bson::Double(v) => {
                self.float += *v;
                self.is_float = true;
            }
            // Non-numeric values are skipped by $sum.
            _ => {}
        }
    }

    fn into_bson(self) -> Bson {
        if self.is_float {
            Bson::Double(self.float + self.int as f64)
        } else {
            Bson::Int64(self.int)
        }
    }
}

fn group_rows(rows: &[Document], definition: &Document) -> Vec<Document> {
    let key_expression = definition.get("_id").cloned().unwrap_or(Bson::Null);
    let accumulators: Vec<(&String, &Bson)> = definition
        .iter()
        .filter(|(field, _)| field.as_str() != "_id")
        .filter_map(|(field, accumulator)| match accumulator {
            Bson::Document(acc) => match acc.get("$sum") {
                Some(operand) => Some((field, operand)),
                None => {
                    tracing::warn!(field = %field, "Unsupported accumulator ignored");
                    None
                }
            },
            _ => None,
        })
        .collect();

    let mut groups: Vec<(Bson, Vec<Sum>)> = Vec::new();
    for row in rows {
        let key = evaluate(row, &key_expression);
        let index = match groups.iter().position(|(k, _)| *k == key) {
            Some(index) => index,
            None => {
                groups.push((key, vec![Sum::default(); accumulators.len()]));
                groups.len() - 1
            }
        };
        for (sum, (_, operand)) in groups[index].1.iter_mut().zip(&accumulators) {
            sum.add(&evaluate(row, operand));
        }
    }

    groups
        .into_iter()
        .map(|(key, sums)| {
            let mut output = Document::new();
            output.insert("_id", key);
            for (sum, (field, _)) in sums.into_iter().zip(&accumulators) {
                output.insert(field.as_str(), sum.into_bson());
            }
            output
        })
        .collect()
}
