use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    migration::{migrate_all, migrate_user, migrated_records, migration_status},
    user::{
        bulk_create_users, create_user, delete_all_users, delete_user, get_user,
        get_user_by_email, list_users, update_user,
    },
};
use crate::health::{healthz, readyz};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/api/users", post(create_user))
        .route("/api/users", get(list_users))
        .route("/api/users", delete(delete_all_users))
        .route("/api/users/bulk", post(bulk_create_users))
        .route("/api/users/by-email/{email}", get(get_user_by_email))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}", put(update_user))
        .route("/api/users/{id}", delete(delete_user))
        // Migration
        .route("/api/migration/status", get(migration_status))
        .route("/api/migration/records", get(migrated_records))
        .route("/api/migration/bulk", post(migrate_all))
        .route("/api/migration/user/{id}", post(migrate_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
