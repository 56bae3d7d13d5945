// Copyright 2025 Cowboy AI, LLC.

//! Document store collaborator
//!
//! The engine reads and writes documents only through this trait; every
//! external read happens at the applier boundary, keeping resolution and
//! authorization pure. Implementations are expected to provide at least
//! read-committed visibility.

use crate::document::{CommitStatus, Document, DocumentId, FieldValue};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Store trait for loading and mutating documents
pub trait DocumentStore: Send + Sync {
    /// Load a document snapshot by id
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, String>;

    /// Write a single field on a document
    fn set_field(&self, id: &DocumentId, field: &str, value: FieldValue) -> Result<(), String>;

    /// Read a document's commit status
    fn commit_status(&self, id: &DocumentId) -> Result<Option<CommitStatus>, String>;

    /// Write a document's commit status
    fn set_commit_status(&self, id: &DocumentId, status: CommitStatus) -> Result<(), String>;
}

/// In-memory document store for testing
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document
    pub fn insert(&self, document: Document) {
        self.documents
            .write()
            .unwrap()
            .insert(document.id().clone(), document);
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, String> {
        Ok(self.documents.read().unwrap().get(id).cloned())
    }

    fn set_field(&self, id: &DocumentId, field: &str, value: FieldValue) -> Result<(), String> {
        let mut documents = self.documents.write().unwrap();
        let document = documents
            .get_mut(id)
            .ok_or_else(|| format!("no document {id}"))?;
        document.set_field(field, value);
        Ok(())
    }

    fn commit_status(&self, id: &DocumentId) -> Result<Option<CommitStatus>, String> {
        Ok(self
            .documents
            .read()
            .unwrap()
            .get(id)
            .map(|d| d.commit_status()))
    }

    fn set_commit_status(&self, id: &DocumentId, status: CommitStatus) -> Result<(), String> {
        let mut documents = self.documents.write().unwrap();
        let document = documents
            .get_mut(id)
            .ok_or_else(|| format!("no document {id}"))?;
        document.set_commit_status(status);
        Ok(())
    }
}
