use std::collections::HashSet;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use usermgmt_users_schema::users;

use crate::domain::repository::RecordRepository;
use crate::domain::types::{RecordDraft, UpdateOutcome, UserRecord};
use crate::error::ServiceError;

/// Records per put/delete batch sent to the store.
const BATCH_SIZE: usize = 500;

#[derive(Clone)]
pub struct DbRecordRepository {
    pub db: DatabaseConnection,
}

impl RecordRepository for DbRecordRepository {
    async fn create(&self, draft: &RecordDraft) -> Result<i64, ServiceError> {
        // Lookup-before-insert; the unique index on email is the backstop
        // for concurrent creates that both pass this check.
        if self.find_by_email(&draft.email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }
        let model = draft_active_model(draft, Utc::now())
            .insert(&self.db)
            .await
            .context("create record")?;
        Ok(model.id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, ServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find record by id")?;
        Ok(model.map(record_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find record by email")?;
        Ok(model.map(record_from_model))
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, ServiceError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list records")?;
        Ok(models.into_iter().map(record_from_model).collect())
    }

    async fn list_page(&self, limit: u64, offset: u64) -> Result<Vec<UserRecord>, ServiceError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .context("list record page")?;
        Ok(models.into_iter().map(record_from_model).collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<UserRecord>, ServiceError> {
        // No index: load the full set and filter in memory.
        let term_lower = term.to_lowercase();
        let mut records = self.list_all().await?;
        records.retain(|record| record.matches_term(term, &term_lower));
        Ok(records)
    }

    async fn update(&self, id: i64, draft: &RecordDraft) -> Result<UpdateOutcome, ServiceError> {
        let existing = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find record for update")?;
        let Some(existing) = existing else {
            return Ok(UpdateOutcome::NotFound);
        };

        if existing.email != draft.email
            && self.find_by_email(&draft.email).await?.is_some()
        {
            return Ok(UpdateOutcome::EmailConflict);
        }

        // Full replace except id and created_at.
        let mut model = draft_active_model(draft, Utc::now());
        model.id = Set(id);
        model.created_at = Set(existing.created_at);
        model.update(&self.db).await.context("update record")?;
        Ok(UpdateOutcome::Updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let result = users::Entity::delete_many()
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete record")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count records")?;
        Ok(count)
    }

    async fn bulk_create(&self, drafts: &[RecordDraft]) -> Result<u64, ServiceError> {
        let mut batch: Vec<users::ActiveModel> = Vec::new();
        // Emails accepted during this run; accepted-but-unflushed records are
        // not yet visible to find_by_email.
        let mut seen: HashSet<&str> = HashSet::new();
        let mut success = 0u64;

        for draft in drafts {
            if seen.contains(draft.email.as_str()) {
                continue;
            }
            match self.find_by_email(&draft.email).await {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(email = %draft.email, error = ?e, "skipping record in bulk create");
                    continue;
                }
            }
            seen.insert(draft.email.as_str());
            batch.push(draft_active_model(draft, Utc::now()));
            success += 1;

            if batch.len() >= BATCH_SIZE {
                users::Entity::insert_many(std::mem::take(&mut batch))
                    .exec(&self.db)
                    .await
                    .context("flush bulk create batch")?;
            }
        }

        if !batch.is_empty() {
            users::Entity::insert_many(batch)
                .exec(&self.db)
                .await
                .context("flush bulk create remainder")?;
        }
        Ok(success)
    }

    async fn delete_all(&self) -> Result<(), ServiceError> {
        // Key-only scan, then delete in batches.
        let ids: Vec<i64> = users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .context("scan record ids")?;

        for chunk in ids.chunks(BATCH_SIZE) {
            users::Entity::delete_many()
                .filter(users::Column::Id.is_in(chunk.iter().copied()))
                .exec(&self.db)
                .await
                .context("delete record batch")?;
        }
        Ok(())
    }
}

fn record_from_model(model: users::Model) -> UserRecord {
    UserRecord {
        id: model.id,
        name: model.name,
        dob: model.dob,
        email: model.email,
        password: model.password,
        phone: model.phone,
        gender: model.gender,
        address: model.address,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn draft_active_model(draft: &RecordDraft, now: DateTime<Utc>) -> users::ActiveModel {
    users::ActiveModel {
        id: NotSet,
        name: Set(draft.name.clone()),
        dob: Set(draft.dob),
        email: Set(draft.email.clone()),
        password: Set(draft.password.clone()),
        phone: Set(draft.phone.clone()),
        gender: Set(draft.gender.clone()),
        address: Set(draft.address.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
