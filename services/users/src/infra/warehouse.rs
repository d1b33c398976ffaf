use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};

use crate::domain::repository::WarehouseSink;
use crate::domain::types::{MigratedRowSample, UserRecord, WarehouseRow};
use crate::error::ServiceError;

/// Destination schema and table, mirroring the reporting dataset layout.
const DATASET: &str = "user_management";
const TABLE: &str = "users";

#[derive(Clone)]
pub struct PgWarehouseSink {
    pub db: DatabaseConnection,
}

impl WarehouseSink for PgWarehouseSink {
    async fn ensure_schema(&self) -> Result<(), ServiceError> {
        let backend = self.db.get_database_backend();

        let schema = self
            .db
            .query_one(Statement::from_sql_and_values(
                backend,
                "SELECT 1 FROM information_schema.schemata WHERE schema_name = $1",
                [DATASET.into()],
            ))
            .await
            .context("check warehouse schema")?;
        if schema.is_none() {
            self.db
                .execute(Statement::from_string(
                    backend,
                    format!(r#"CREATE SCHEMA "{DATASET}""#),
                ))
                .await
                .context("create warehouse schema")?;
        }

        let table = self
            .db
            .query_one(Statement::from_sql_and_values(
                backend,
                "SELECT 1 FROM information_schema.tables \
                 WHERE table_schema = $1 AND table_name = $2",
                [DATASET.into(), TABLE.into()],
            ))
            .await
            .context("check warehouse table")?;
        if table.is_none() {
            self.db
                .execute(Statement::from_string(
                    backend,
                    format!(
                        r#"CREATE TABLE "{DATASET}"."{TABLE}" (
                            id BIGINT NOT NULL,
                            name TEXT NOT NULL,
                            dob DATE NOT NULL,
                            email TEXT NOT NULL,
                            phone TEXT NOT NULL,
                            gender TEXT NOT NULL,
                            address TEXT NOT NULL,
                            created_at DOUBLE PRECISION NOT NULL,
                            migrated_at DOUBLE PRECISION NOT NULL
                        )"#
                    ),
                ))
                .await
                .context("create warehouse table")?;
        }
        Ok(())
    }

    async fn insert_row(&self, record: &UserRecord) -> bool {
        let row = WarehouseRow::from_record(record, Utc::now());
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            format!(
                r#"INSERT INTO "{DATASET}"."{TABLE}"
                   (id, name, dob, email, phone, gender, address, created_at, migrated_at)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#
            ),
            [
                row.id.into(),
                row.name.into(),
                row.dob.into(),
                row.email.into(),
                row.phone.into(),
                row.gender.into(),
                row.address.into(),
                row.created_at.into(),
                row.migrated_at.into(),
            ],
        );
        match self.db.execute(stmt).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    id = record.id,
                    email = %record.email,
                    error = %e,
                    "warehouse row insert rejected"
                );
                false
            }
        }
    }

    async fn count_rows(&self) -> Result<u64, ServiceError> {
        let row = self
            .db
            .query_one(Statement::from_string(
                self.db.get_database_backend(),
                format!(r#"SELECT COUNT(*) AS count FROM "{DATASET}"."{TABLE}""#),
            ))
            .await
            .context("count warehouse rows")?;
        let count: i64 = match row {
            Some(row) => row.try_get("", "count").context("read warehouse count")?,
            None => 0,
        };
        Ok(count as u64)
    }

    async fn sample_rows(&self, limit: u64) -> Result<Vec<MigratedRowSample>, ServiceError> {
        #[derive(FromQueryResult)]
        struct SampleRow {
            id: i64,
            name: String,
            email: String,
            phone: String,
        }

        let rows = SampleRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            format!(r#"SELECT id, name, email, phone FROM "{DATASET}"."{TABLE}" LIMIT $1"#),
            [(limit as i64).into()],
        ))
        .all(&self.db)
        .await
        .context("sample warehouse rows")?;

        Ok(rows
            .into_iter()
            .map(|row| MigratedRowSample {
                id: row.id,
                name: row.name,
                email: row.email,
                phone: row.phone,
            })
            .collect())
    }
}
