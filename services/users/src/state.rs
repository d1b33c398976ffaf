use sea_orm::DatabaseConnection;

use crate::infra::db::DbRecordRepository;
use crate::infra::warehouse::PgWarehouseSink;

/// Shared application state passed to every handler via axum `State`.
///
/// Both connections are long-lived clients constructed once at startup. The
/// record store and the warehouse are independent systems; nothing links
/// them transactionally.
#[derive(Clone)]
pub struct AppState {
    pub records: DatabaseConnection,
    pub warehouse: DatabaseConnection,
}

impl AppState {
    pub fn record_repo(&self) -> DbRecordRepository {
        DbRecordRepository {
            db: self.records.clone(),
        }
    }

    pub fn warehouse_sink(&self) -> PgWarehouseSink {
        PgWarehouseSink {
            db: self.warehouse.clone(),
        }
    }
}
