use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::{RecordDraft, UserRecord};
use crate::error::ServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    ClearRecordsUseCase, CreateRecordUseCase, DeleteRecordUseCase, GetRecordByEmailUseCase,
    GetRecordUseCase, ImportRecordsUseCase, ListRecordsUseCase, RecordQuery, UpdateRecordUseCase,
};

/// Malformed textual ids present identically to unknown ids.
fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.parse().map_err(|_| ServiceError::RecordNotFound)
}

// ── Request / response shapes ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub dob: chrono::NaiveDate,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
}

impl UserPayload {
    fn into_draft(self) -> RecordDraft {
        RecordDraft {
            name: self.name,
            dob: self.dob,
            email: self.email,
            password: self.password,
            phone: self.phone,
            gender: self.gender,
            address: self.address,
        }
    }
}

/// Password is never serialized back out.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub dob: chrono::NaiveDate,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            dob: record.dob,
            email: record.email,
            phone: record.phone,
            gender: record.gender,
            address: record.address,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub count: usize,
}

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: u64,
}

// ── POST /api/users ──────────────────────────────────────────────────────────

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ServiceError> {
    let usecase = CreateRecordUseCase {
        repo: state.record_repo(),
    };
    let id = usecase.execute(body.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListResponse>, ServiceError> {
    let selector = match (query.search, query.limit) {
        (Some(term), _) if !term.is_empty() => RecordQuery::Search(term),
        (_, Some(limit)) => RecordQuery::Page {
            limit,
            offset: query.offset.unwrap_or(0),
        },
        _ => RecordQuery::All,
    };
    let usecase = ListRecordsUseCase {
        repo: state.record_repo(),
    };
    let users: Vec<UserResponse> = usecase
        .execute(selector)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    let count = users.len();
    Ok(Json(UserListResponse { users, count }))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ServiceError> {
    let id = parse_id(&id)?;
    let usecase = GetRecordUseCase {
        repo: state.record_repo(),
    };
    let record = usecase.execute(id).await?;
    Ok(Json(record.into()))
}

// ── GET /api/users/by-email/{email} ──────────────────────────────────────────

pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, ServiceError> {
    let usecase = GetRecordByEmailUseCase {
        repo: state.record_repo(),
    };
    let record = usecase.execute(&email).await?;
    Ok(Json(record.into()))
}

// ── PUT /api/users/{id} ──────────────────────────────────────────────────────

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UserPayload>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateRecordUseCase {
        repo: state.record_repo(),
    };
    usecase.execute(id, body.into_draft()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/users/{id} ───────────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id(&id)?;
    let usecase = DeleteRecordUseCase {
        repo: state.record_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/users/bulk ─────────────────────────────────────────────────────

pub async fn bulk_create_users(
    State(state): State<AppState>,
    Json(body): Json<Vec<UserPayload>>,
) -> Result<Json<ImportResponse>, ServiceError> {
    let drafts = body.into_iter().map(UserPayload::into_draft).collect();
    let usecase = ImportRecordsUseCase {
        repo: state.record_repo(),
    };
    let imported = usecase.execute(drafts).await?;
    Ok(Json(ImportResponse { imported }))
}

// ── DELETE /api/users ────────────────────────────────────────────────────────

pub async fn delete_all_users(State(state): State<AppState>) -> Result<StatusCode, ServiceError> {
    let usecase = ClearRecordsUseCase {
        repo: state.record_repo(),
    };
    usecase.execute().await?;
    Ok(StatusCode::NO_CONTENT)
}
