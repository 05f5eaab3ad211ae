//! Document auto-numbering.
//!
//! Numbers follow `PREFIX[-YEAR]-NNNN` where `NNNN` is a zero-padded
//! running counter scoped per `(document type, year)` when the year is
//! embedded, else per type alone. Allocation is an exclusive increment in
//! the store, so concurrent document creations never share a number, and a
//! number consumed by a later-deleted document is never reissued.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};

use docvault_core::AppResult;
use docvault_entity::document_type::DocumentType;
use docvault_store::repositories::SequenceRepository;
use docvault_store::store::SequenceScope;

/// Produces document numbers for types with numbering enabled.
#[derive(Debug, Clone)]
pub struct NumberingService {
    /// Sequence counter repository.
    sequence_repo: Arc<SequenceRepository>,
}

impl NumberingService {
    /// Creates a new numbering service.
    pub fn new(sequence_repo: Arc<SequenceRepository>) -> Self {
        Self { sequence_repo }
    }

    /// Allocate the next number for a document of the given type.
    ///
    /// Returns `None` when the type has numbering disabled. `now` fixes the
    /// year embedded in the number and the counter scope.
    pub async fn allocate(
        &self,
        doc_type: &DocumentType,
        now: DateTime<Utc>,
    ) -> AppResult<Option<String>> {
        if !doc_type.auto_number_enabled {
            return Ok(None);
        }

        let year = doc_type.auto_number_includes_year.then(|| now.year());
        let sequence = self
            .sequence_repo
            .next(SequenceScope {
                document_type_id: doc_type.id,
                year,
            })
            .await?;

        Ok(Some(format_number(
            &doc_type.auto_number_prefix,
            year,
            sequence,
            doc_type.auto_number_digits,
        )))
    }
}

/// Render a document number from its parts.
pub fn format_number(prefix: &str, year: Option<i32>, sequence: i64, digits: u8) -> String {
    let width = digits as usize;
    match year {
        Some(year) => format!("{prefix}-{year}-{sequence:0width$}"),
        None => format!("{prefix}-{sequence:0width$}"),
    }
}
