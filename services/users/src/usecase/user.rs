use crate::domain::repository::RecordRepository;
use crate::domain::types::{RecordDraft, UpdateOutcome, UserRecord};
use crate::error::ServiceError;

// ── CreateRecord ─────────────────────────────────────────────────────────────

pub struct CreateRecordUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> CreateRecordUseCase<R> {
    pub async fn execute(&self, draft: RecordDraft) -> Result<i64, ServiceError> {
        self.repo.create(&draft).await
    }
}

// ── GetRecord ────────────────────────────────────────────────────────────────

pub struct GetRecordUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> GetRecordUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<UserRecord, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::RecordNotFound)
    }
}

// ── GetRecordByEmail ─────────────────────────────────────────────────────────

pub struct GetRecordByEmailUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> GetRecordByEmailUseCase<R> {
    pub async fn execute(&self, email: &str) -> Result<UserRecord, ServiceError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(ServiceError::RecordNotFound)
    }
}

// ── ListRecords ──────────────────────────────────────────────────────────────

/// Selector for list queries: everything, an in-memory search, or a page.
#[derive(Debug, Clone)]
pub enum RecordQuery {
    All,
    Search(String),
    Page { limit: u64, offset: u64 },
}

pub struct ListRecordsUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> ListRecordsUseCase<R> {
    pub async fn execute(&self, query: RecordQuery) -> Result<Vec<UserRecord>, ServiceError> {
        match query {
            RecordQuery::All => self.repo.list_all().await,
            RecordQuery::Search(term) => self.repo.search(&term).await,
            RecordQuery::Page { limit, offset } => self.repo.list_page(limit, offset).await,
        }
    }
}

// ── UpdateRecord ─────────────────────────────────────────────────────────────

pub struct UpdateRecordUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> UpdateRecordUseCase<R> {
    pub async fn execute(&self, id: i64, draft: RecordDraft) -> Result<(), ServiceError> {
        match self.repo.update(id, &draft).await? {
            UpdateOutcome::Updated => Ok(()),
            UpdateOutcome::NotFound => Err(ServiceError::RecordNotFound),
            UpdateOutcome::EmailConflict => Err(ServiceError::DuplicateEmail),
        }
    }
}

// ── DeleteRecord ─────────────────────────────────────────────────────────────

pub struct DeleteRecordUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> DeleteRecordUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ServiceError::RecordNotFound)
        }
    }
}

// ── ImportRecords ────────────────────────────────────────────────────────────

pub struct ImportRecordsUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> ImportRecordsUseCase<R> {
    pub async fn execute(&self, drafts: Vec<RecordDraft>) -> Result<u64, ServiceError> {
        self.repo.bulk_create(&drafts).await
    }
}

// ── ClearRecords ─────────────────────────────────────────────────────────────

pub struct ClearRecordsUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> ClearRecordsUseCase<R> {
    pub async fn execute(&self) -> Result<(), ServiceError> {
        self.repo.delete_all().await
    }
}
