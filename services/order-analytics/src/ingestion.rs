//! Record ingestion boundary
//!
//! Validates incoming raw records once, before they reach any aggregation,
//! flattening, or bucketing. Downstream code never re-checks invariants.
//!
//! Two policies are supported:
//! - skip-and-log: invalid records are logged and collected, the rest of
//!   the batch is accepted
//! - abort: the first invalid record fails the whole batch

use std::collections::HashSet;

use order_types::errors::RecordError;
use order_types::ids::OrderId;
use order_types::order::{OrderRecord, RawOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Errors that can occur during record ingestion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestionError {
    #[error("record {index} rejected: {source}")]
    Rejected {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("record {index} reuses id {order_id}")]
    DuplicateId { index: usize, order_id: String },
}

impl IngestionError {
    /// Position of the offending record in the input batch.
    pub fn index(&self) -> usize {
        match self {
            IngestionError::Rejected { index, .. } | IngestionError::DuplicateId { index, .. } => {
                *index
            }
        }
    }
}

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPolicy {
    /// Log the record, keep it in the report, continue with the batch.
    #[default]
    SkipInvalid,
    /// Fail the whole batch on the first invalid record.
    AbortOnFirst,
}

/// Configuration for the record ingester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngesterConfig {
    pub policy: IngestPolicy,
    /// Country calling code stripped from phone numbers, e.g. `"91"`.
    pub country_code: Option<String>,
}

/// Outcome of a batch ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Valid records, in input order.
    pub accepted: Vec<OrderRecord>,
    /// Invalid records skipped under [`IngestPolicy::SkipInvalid`].
    pub rejected: Vec<IngestionError>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validates raw records into [`OrderRecord`]s.
///
/// Holds configuration only; nothing carries over between batches.
#[derive(Debug, Clone, Default)]
pub struct RecordIngester {
    config: IngesterConfig,
}

impl RecordIngester {
    /// Create a new ingester with the given configuration.
    pub fn new(config: IngesterConfig) -> Self {
        debug!(
            policy = ?config.policy,
            country_code = config.country_code.as_deref().unwrap_or(""),
            "RecordIngester initialized"
        );
        Self { config }
    }

    /// Create a new ingester with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(IngesterConfig::default())
    }

    pub fn config(&self) -> &IngesterConfig {
        &self.config
    }

    /// Validate a single record.
    pub fn ingest_one(&self, raw: RawOrder) -> Result<OrderRecord, RecordError> {
        raw.into_record(self.config.country_code.as_deref())
    }

    /// Validate a batch of records.
    ///
    /// Record ids must be unique within the batch, since flattened row ids
    /// are derived from them. A repeated id is treated like any other
    /// invalid record.
    pub fn ingest_batch<I>(&self, raws: I) -> Result<IngestReport, IngestionError>
    where
        I: IntoIterator<Item = RawOrder>,
    {
        let mut report = IngestReport::default();
        let mut seen_ids: HashSet<OrderId> = HashSet::new();

        for (index, raw) in raws.into_iter().enumerate() {
            let outcome = self
                .ingest_one(raw)
                .map_err(|source| IngestionError::Rejected { index, source })
                .and_then(|record| {
                    if seen_ids.insert(record.id()) {
                        Ok(record)
                    } else {
                        Err(IngestionError::DuplicateId {
                            index,
                            order_id: record.id().to_string(),
                        })
                    }
                });

            match outcome {
                Ok(record) => report.accepted.push(record),
                Err(err) => match self.config.policy {
                    IngestPolicy::AbortOnFirst => {
                        warn!(index, error = %err, "Invalid record, aborting batch");
                        return Err(err);
                    }
                    IngestPolicy::SkipInvalid => {
                        warn!(index, error = %err, "Skipping invalid record");
                        report.rejected.push(err);
                    }
                },
            }
        }

        info!(
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "Batch ingested"
        );

        Ok(report)
    }
}
