use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use usermgmt_users::domain::repository::{RecordRepository, WarehouseSink};
use usermgmt_users::domain::types::{
    MigratedRowSample, RecordDraft, UpdateOutcome, UserRecord, WarehouseRow,
};
use usermgmt_users::error::ServiceError;

// ── InMemoryRecordRepo ───────────────────────────────────────────────────────

/// In-memory record store honoring the repository contract: store-allocated
/// ids, lookup-before-insert uniqueness, created_at carried across updates.
#[derive(Clone)]
pub struct InMemoryRecordRepo {
    records: Arc<Mutex<Vec<UserRecord>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryRecordRepo {
    pub fn empty() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Shared handle to the backing store for post-execution inspection.
    pub fn records_handle(&self) -> Arc<Mutex<Vec<UserRecord>>> {
        Arc::clone(&self.records)
    }
}

impl RecordRepository for InMemoryRecordRepo {
    async fn create(&self, draft: &RecordDraft) -> Result<i64, ServiceError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.email == draft.email) {
            return Err(ServiceError::DuplicateEmail);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        records.push(UserRecord {
            id,
            name: draft.name.clone(),
            dob: draft.dob,
            email: draft.email.clone(),
            password: draft.password.clone(),
            phone: draft.phone.clone(),
            gender: draft.gender.clone(),
            address: draft.address.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, ServiceError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ServiceError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, ServiceError> {
        let mut all = self.records.lock().unwrap().clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn list_page(&self, limit: u64, offset: u64) -> Result<Vec<UserRecord>, ServiceError> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<UserRecord>, ServiceError> {
        let term_lower = term.to_lowercase();
        let mut all = self.list_all().await?;
        all.retain(|r| r.matches_term(term, &term_lower));
        Ok(all)
    }

    async fn update(&self, id: i64, draft: &RecordDraft) -> Result<UpdateOutcome, ServiceError> {
        let mut records = self.records.lock().unwrap();
        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        if records[index].email != draft.email
            && records.iter().any(|r| r.email == draft.email)
        {
            return Ok(UpdateOutcome::EmailConflict);
        }
        let created_at = records[index].created_at;
        records[index] = UserRecord {
            id,
            name: draft.name.clone(),
            dob: draft.dob,
            email: draft.email.clone(),
            password: draft.password.clone(),
            phone: draft.phone.clone(),
            gender: draft.gender.clone(),
            address: draft.address.clone(),
            created_at,
            updated_at: Utc::now(),
        };
        Ok(UpdateOutcome::Updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn bulk_create(&self, drafts: &[RecordDraft]) -> Result<u64, ServiceError> {
        let mut success = 0;
        for draft in drafts {
            if self.create(draft).await.is_ok() {
                success += 1;
            }
        }
        Ok(success)
    }

    async fn delete_all(&self) -> Result<(), ServiceError> {
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

// ── RecordingWarehouse ───────────────────────────────────────────────────────

/// Append-only sink capturing every accepted row; rejects rows for the
/// configured emails to exercise partial-failure reporting.
#[derive(Clone)]
pub struct RecordingWarehouse {
    rows: Arc<Mutex<Vec<WarehouseRow>>>,
    reject_emails: HashSet<String>,
}

impl RecordingWarehouse {
    pub fn empty() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            reject_emails: HashSet::new(),
        }
    }

    pub fn rejecting(emails: &[&str]) -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            reject_emails: emails.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn rows_handle(&self) -> Arc<Mutex<Vec<WarehouseRow>>> {
        Arc::clone(&self.rows)
    }
}

impl WarehouseSink for RecordingWarehouse {
    async fn ensure_schema(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn insert_row(&self, record: &UserRecord) -> bool {
        if self.reject_emails.contains(&record.email) {
            return false;
        }
        self.rows
            .lock()
            .unwrap()
            .push(WarehouseRow::from_record(record, Utc::now()));
        true
    }

    async fn count_rows(&self) -> Result<u64, ServiceError> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn sample_rows(&self, limit: u64) -> Result<Vec<MigratedRowSample>, ServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .take(limit as usize)
            .map(|row| MigratedRowSample {
                id: row.id,
                name: row.name.clone(),
                email: row.email.clone(),
                phone: row.phone.clone(),
            })
            .collect())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn draft(name: &str, email: &str) -> RecordDraft {
    RecordDraft {
        name: name.into(),
        dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        email: email.into(),
        password: "hunter2".into(),
        phone: "1234567890".into(),
        gender: "Female".into(),
        address: "1 Main St".into(),
    }
}
