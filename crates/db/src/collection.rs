//! The seam between [`MovieRepo`](crate::repositories::MovieRepo) and the
//! document store.
//!
//! The repository only ever issues the handful of operations below, with
//! documents built by [`crate::query`]. Production wires in
//! [`MongoMovieCollection`]; tests use `InMemoryMovieCollection` from the
//! `test-utils` feature.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::Collection;

use crate::error::DbError;

/// Raw document operations on the `movies` collection.
#[async_trait]
pub trait MovieCollection: Send + Sync {
    /// All documents matching `filter`, ordered by `sort`.
    async fn find(&self, filter: Document, sort: Document) -> Result<Vec<Document>, DbError>;

    /// The document whose `_id` is `id`, if any.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, DbError>;

    /// Insert a document without an `_id`, returning the id assigned to it.
    async fn insert_one(&self, document: Document) -> Result<ObjectId, DbError>;

    /// Apply `set` as a `$set` to the document with `_id == id`.
    ///
    /// Returns the number of documents matched (0 or 1).
    async fn update_by_id(&self, id: ObjectId, set: Document) -> Result<u64, DbError>;

    /// Remove the document with `_id == id`, returning how many were removed.
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, DbError>;

    /// Exact number of documents matching `filter`.
    async fn count(&self, filter: Document) -> Result<u64, DbError>;

    /// Run an aggregation pipeline and collect every output row.
    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, DbError>;
}

/// [`MovieCollection`] backed by a live MongoDB collection.
#[derive(Clone)]
pub struct MongoMovieCollection {
    inner: Collection<Document>,
}

impl MongoMovieCollection {
    pub fn new(inner: Collection<Document>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl MovieCollection for MongoMovieCollection {
    async fn find(&self, filter: Document, sort: Document) -> Result<Vec<Document>, DbError> {
        let cursor = self.inner.find(filter).sort(sort).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, DbError> {
        Ok(self.inner.find_one(doc! { "_id": id }).await?)
    }

    async fn insert_one(&self, document: Document) -> Result<ObjectId, DbError> {
        let result = self.inner.insert_one(document).await?;
        // The driver generates an ObjectId for documents inserted without one.
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DbError::Consistency {
                id: result.inserted_id.to_string(),
            })
    }

    async fn update_by_id(&self, id: ObjectId, set: Document) -> Result<u64, DbError> {
        let result = self
            .inner
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, DbError> {
        let result = self.inner.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn count(&self, filter: Document) -> Result<u64, DbError> {
        Ok(self.inner.count_documents(filter).await?)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, DbError> {
        let cursor = self.inner.aggregate(pipeline).await?;
        Ok(cursor.try_collect().await?)
    }
}
