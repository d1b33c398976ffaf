use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Live user record held in the operational store.
///
/// The id is store-allocated and immutable; `created_at` survives every
/// update while `updated_at` is bumped on each one.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Search predicate: case-insensitive substring on name or email,
    /// verbatim (unnormalized) substring on phone.
    pub fn matches_term(&self, term: &str, term_lower: &str) -> bool {
        self.name.to_lowercase().contains(term_lower)
            || self.email.to_lowercase().contains(term_lower)
            || self.phone.contains(term)
    }
}

/// Field set accepted by create and update. The store assigns id and
/// timestamps; update is a full replace of these fields.
#[derive(Debug, Clone)]
pub struct RecordDraft {
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
}

/// Outcome of an update against the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    /// The new email already belongs to another record; nothing was applied.
    EmailConflict,
}

/// Row shape written to the warehouse. Append-only; re-migrating a record
/// produces a duplicate row. There is no password field in this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseRow {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub created_at: f64,
    pub migrated_at: f64,
}

impl WarehouseRow {
    pub fn from_record(record: &UserRecord, migrated_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            dob: record.dob,
            email: record.email.clone(),
            phone: record.phone.clone(),
            gender: record.gender.clone(),
            address: record.address.clone(),
            created_at: epoch_seconds(record.created_at),
            migrated_at: epoch_seconds(migrated_at),
        }
    }
}

/// Epoch seconds as floating-point, millisecond precision.
fn epoch_seconds(ts: DateTime<Utc>) -> f64 {
    ts.timestamp_millis() as f64 / 1000.0
}

/// Aggregate result of a bulk migration. Batches always complete; failures
/// are counted and described, never escalated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationReport {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
    pub errors: Vec<String>,
}

/// Counts derived from two independently queried stores. `pending` is
/// signed: re-migrating records drives it negative, and it must not be
/// clamped to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub total: u64,
    pub migrated: u64,
    pub pending: i64,
}

/// Narrow projection of a warehouse row returned by sample queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigratedRowSample {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}
