#![allow(async_fn_in_trait)]

use crate::domain::types::{
    MigratedRowSample, MigrationReport, RecordDraft, UpdateOutcome, UserRecord,
};
use crate::error::ServiceError;

/// Port over the operational record store.
pub trait RecordRepository: Send + Sync {
    /// Allocate an id and persist the draft. Fails with
    /// [`ServiceError::DuplicateEmail`] if the email is already taken.
    async fn create(&self, draft: &RecordDraft) -> Result<i64, ServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, ServiceError>;

    /// Exact-match lookup, case-sensitive, limited to one result.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ServiceError>;

    /// Full set, ordered by created_at descending.
    async fn list_all(&self) -> Result<Vec<UserRecord>, ServiceError>;

    /// Same ordering as [`list_all`](Self::list_all), paginated server-side.
    async fn list_page(&self, limit: u64, offset: u64) -> Result<Vec<UserRecord>, ServiceError>;

    /// Loads the full set and filters in memory; O(n) in record count.
    async fn search(&self, term: &str) -> Result<Vec<UserRecord>, ServiceError>;

    /// Full replace of all fields except id and created_at.
    async fn update(&self, id: i64, draft: &RecordDraft) -> Result<UpdateOutcome, ServiceError>;

    /// Returns false if the id does not resolve to a live record.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;

    /// Counts without materializing full records.
    async fn count(&self) -> Result<u64, ServiceError>;

    /// Skips drafts whose email is already taken; returns the number of
    /// records actually created.
    async fn bulk_create(&self, drafts: &[RecordDraft]) -> Result<u64, ServiceError>;

    async fn delete_all(&self) -> Result<(), ServiceError>;
}

/// Port over the analytical warehouse. Rows are append-only; the sink is
/// not a second source of truth for current state.
pub trait WarehouseSink: Send + Sync {
    /// Idempotently create the destination schema and table if absent.
    /// Check-then-create in two trips; not safe under concurrent bootstrap.
    async fn ensure_schema(&self) -> Result<(), ServiceError>;

    /// Insert one row. Failures are logged and reported as `false`, never
    /// raised.
    async fn insert_row(&self, record: &UserRecord) -> bool;

    /// Sequential per-row insertion with per-record attribution. An
    /// implementation may batch rows under the hood as long as the report
    /// contract is unchanged.
    async fn bulk_insert(&self, records: &[UserRecord]) -> MigrationReport {
        let mut report = MigrationReport {
            total: records.len() as u64,
            success: 0,
            failed: 0,
            errors: Vec::new(),
        };
        for record in records {
            if self.insert_row(record).await {
                report.success += 1;
            } else {
                report.failed += 1;
                report.errors.push(format!("failed to migrate {}", record.email));
            }
        }
        report
    }

    async fn count_rows(&self) -> Result<u64, ServiceError>;

    /// Up to `limit` rows with only id, name, email, phone populated.
    async fn sample_rows(&self, limit: u64) -> Result<Vec<MigratedRowSample>, ServiceError>;
}
