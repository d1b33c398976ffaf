use sea_orm::Database;
use tracing::info;

use usermgmt_users::config::UsersConfig;
use usermgmt_users::domain::repository::WarehouseSink as _;
use usermgmt_users::router::build_router;
use usermgmt_users::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = UsersConfig::from_env();

    let records = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to record store");
    let warehouse = Database::connect(&config.warehouse_database_url)
        .await
        .expect("failed to connect to warehouse");

    let state = AppState { records, warehouse };

    // Check-then-create bootstrap; not safe under concurrent startup of
    // multiple processes, so it runs once here before serving.
    state
        .warehouse_sink()
        .ensure_schema()
        .await
        .expect("failed to bootstrap warehouse schema");

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.users_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("users service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
