use crate::domain::repository::{RecordRepository, WarehouseSink};
use crate::domain::types::{MigratedRowSample, MigrationReport, MigrationStatus};
use crate::error::ServiceError;

// ── MigrationStatus ──────────────────────────────────────────────────────────

pub struct MigrationStatusUseCase<R: RecordRepository, W: WarehouseSink> {
    pub records: R,
    pub warehouse: W,
}

impl<R: RecordRepository, W: WarehouseSink> MigrationStatusUseCase<R, W> {
    pub async fn execute(&self) -> Result<MigrationStatus, ServiceError> {
        let total = self.records.count().await?;
        let migrated = self.warehouse.count_rows().await?;
        // The two counts come from independently queried stores with no
        // snapshot isolation; re-migration drives pending negative.
        Ok(MigrationStatus {
            total,
            migrated,
            pending: total as i64 - migrated as i64,
        })
    }
}

// ── MigrateAll ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum MigrateAllOutcome {
    /// The record store is empty; nothing was written to the warehouse.
    Empty,
    Completed(MigrationReport),
}

pub struct MigrateAllUseCase<R: RecordRepository, W: WarehouseSink> {
    pub records: R,
    pub warehouse: W,
}

impl<R: RecordRepository, W: WarehouseSink> MigrateAllUseCase<R, W> {
    pub async fn execute(&self) -> Result<MigrateAllOutcome, ServiceError> {
        let records = self.records.list_all().await?;
        if records.is_empty() {
            return Ok(MigrateAllOutcome::Empty);
        }
        Ok(MigrateAllOutcome::Completed(
            self.warehouse.bulk_insert(&records).await,
        ))
    }
}

// ── MigrateOne ───────────────────────────────────────────────────────────────

pub struct MigrateOneUseCase<R: RecordRepository, W: WarehouseSink> {
    pub records: R,
    pub warehouse: W,
}

impl<R: RecordRepository, W: WarehouseSink> MigrateOneUseCase<R, W> {
    pub async fn execute(&self, id: i64) -> Result<bool, ServiceError> {
        let record = self
            .records
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::RecordNotFound)?;
        Ok(self.warehouse.insert_row(&record).await)
    }
}

// ── SampleMigrated ───────────────────────────────────────────────────────────

pub struct SampleMigratedUseCase<W: WarehouseSink> {
    pub warehouse: W,
}

impl<W: WarehouseSink> SampleMigratedUseCase<W> {
    pub async fn execute(&self, limit: u64) -> Result<Vec<MigratedRowSample>, ServiceError> {
        self.warehouse.sample_rows(limit).await
    }
}
