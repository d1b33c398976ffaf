/// Users service configuration loaded from environment variables.
#[derive(Debug)]
pub struct UsersConfig {
    /// PostgreSQL connection URL for the operational record store.
    pub database_url: String,
    /// Connection URL for the analytical warehouse.
    pub warehouse_database_url: String,
    /// TCP port for the HTTP server (default 8080). Env var: `USERS_PORT`.
    pub users_port: u16,
}

impl UsersConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            warehouse_database_url: std::env::var("WAREHOUSE_DATABASE_URL")
                .expect("WAREHOUSE_DATABASE_URL"),
            users_port: std::env::var("USERS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }
}
