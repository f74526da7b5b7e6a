// src/assigner.rs
use crate::error::DockeyError;
use crate::shared::SharedKeyGenerator;
use dockey_keygen::{FieldLookup, FieldPath, JsonLookup, Pipeline};
use serde_json::Value;

/// A document together with the key generated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedDocument {
    pub key: Vec<u8>,
    /// The document body, minus any ignored fields.
    pub body: Vec<u8>,
}

/// A document that was skipped, identified by its position in the batch.
#[derive(Debug)]
pub struct DocumentFailure {
    pub index: usize,
    pub error: DockeyError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub keyed: Vec<KeyedDocument>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.keyed.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Generates keys for documents with a compiled [`Pipeline`] and strips the
/// configured ignore fields from their bodies.
#[derive(Debug)]
pub struct KeyAssigner<L = JsonLookup> {
    pipeline: Pipeline<L>,
    ignore_fields: Vec<FieldPath>,
}

impl<L: FieldLookup> KeyAssigner<L> {
    pub fn new(pipeline: Pipeline<L>, ignore_fields: Vec<FieldPath>) -> Self {
        Self {
            pipeline,
            ignore_fields,
        }
    }

    pub fn pipeline(&self) -> &Pipeline<L> {
        &self.pipeline
    }

    pub fn ignore_fields(&self) -> &[FieldPath] {
        &self.ignore_fields
    }

    pub fn next_key(&mut self, document: &[u8]) -> Result<Vec<u8>, DockeyError> {
        Ok(self.pipeline.next(document)?)
    }

    /// Generates the key from the untouched document, then removes the ignore fields
    /// from the body. Bodies that are not JSON objects are passed through as they are.
    pub fn assign(&mut self, document: &[u8]) -> Result<KeyedDocument, DockeyError> {
        let key = self.pipeline.next(document)?;
        let body = self.strip_ignored(document)?;
        Ok(KeyedDocument { key, body })
    }

    /// Assigns keys to every document in order. Failures are logged and recorded in
    /// the report; they never stop the batch.
    pub fn assign_all<I, D>(&mut self, documents: I) -> BatchReport
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[u8]>,
    {
        let mut report = BatchReport::default();

        for (index, document) in documents.into_iter().enumerate() {
            match self.assign(document.as_ref()) {
                Ok(keyed) => report.keyed.push(keyed),
                Err(error) => {
                    log::warn!("Skipping document {}: {}", index, error);
                    report.failures.push(DocumentFailure { index, error });
                }
            }
        }

        log::info!(
            "Assigned keys to {} documents, skipped {}",
            report.succeeded(),
            report.failed()
        );
        report
    }

    pub fn into_shared(self) -> SharedKeyGenerator<L> {
        SharedKeyGenerator::new(self)
    }

    fn strip_ignored(&self, document: &[u8]) -> Result<Vec<u8>, DockeyError> {
        if self.ignore_fields.is_empty() {
            return Ok(document.to_vec());
        }

        let Ok(mut value) = serde_json::from_slice::<Value>(document) else {
            return Ok(document.to_vec());
        };
        let Some(object) = value.as_object_mut() else {
            return Ok(document.to_vec());
        };

        for path in &self.ignore_fields {
            path.remove_from(object);
        }
        Ok(serde_json::to_vec(&value)?)
    }
}
