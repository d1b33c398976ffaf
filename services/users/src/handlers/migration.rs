use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::domain::types::{MigratedRowSample, MigrationReport, MigrationStatus};
use crate::error::ServiceError;
use crate::state::AppState;
use crate::usecase::migration::{
    MigrateAllOutcome, MigrateAllUseCase, MigrateOneUseCase, MigrationStatusUseCase,
    SampleMigratedUseCase,
};

// ── GET /api/migration/status ────────────────────────────────────────────────

pub async fn migration_status(
    State(state): State<AppState>,
) -> Result<Json<MigrationStatus>, ServiceError> {
    let usecase = MigrationStatusUseCase {
        records: state.record_repo(),
        warehouse: state.warehouse_sink(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/migration/records ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecordsQuery {
    pub limit: Option<u64>,
}

#[derive(Serialize)]
pub struct MigratedRecordsResponse {
    pub records: Vec<MigratedRowSample>,
    pub count: usize,
}

pub async fn migrated_records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<MigratedRecordsResponse>, ServiceError> {
    let usecase = SampleMigratedUseCase {
        warehouse: state.warehouse_sink(),
    };
    let records = usecase.execute(query.limit.unwrap_or(100)).await?;
    let count = records.len();
    Ok(Json(MigratedRecordsResponse { records, count }))
}

// ── POST /api/migration/bulk ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BulkMigrationResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<MigrationReport>,
}

pub async fn migrate_all(
    State(state): State<AppState>,
) -> Result<Json<BulkMigrationResponse>, ServiceError> {
    let usecase = MigrateAllUseCase {
        records: state.record_repo(),
        warehouse: state.warehouse_sink(),
    };
    let response = match usecase.execute().await? {
        MigrateAllOutcome::Empty => BulkMigrationResponse {
            success: false,
            message: "no records to migrate",
            report: None,
        },
        MigrateAllOutcome::Completed(report) => BulkMigrationResponse {
            success: true,
            message: "bulk migration completed",
            report: Some(report),
        },
    };
    Ok(Json(response))
}

// ── POST /api/migration/user/{id} ────────────────────────────────────────────

#[derive(Serialize)]
pub struct MigrateOneResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn migrate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MigrateOneResponse>, ServiceError> {
    // Malformed ids present identically to unknown ids.
    let id: i64 = id.parse().map_err(|_| ServiceError::RecordNotFound)?;
    let usecase = MigrateOneUseCase {
        records: state.record_repo(),
        warehouse: state.warehouse_sink(),
    };
    let response = if usecase.execute(id).await? {
        MigrateOneResponse {
            success: true,
            message: "record migrated",
        }
    } else {
        MigrateOneResponse {
            success: false,
            message: "failed to migrate record",
        }
    };
    Ok(Json(response))
}
