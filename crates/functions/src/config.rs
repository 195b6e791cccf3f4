/// Function runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct FunctionsConfig {
    /// PostgreSQL connection string. Only database-backed functions need it.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections (default: `5`).
    pub db_max_connections: u32,
    /// Expected `iss` claim of bearer tokens.
    pub auth_issuer: String,
    /// Location of the JSON Web Key Set used to verify bearer tokens.
    pub auth_jwks_uri: String,
}

impl FunctionsConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default  |
    /// |----------------------|----------|
    /// | `DATABASE_URL`       | unset    |
    /// | `DB_MAX_CONNECTIONS` | `5`      |
    /// | `AUTH_ISSUER`        | empty    |
    /// | `AUTH_JWKS_URI`      | empty    |
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            database_url,
            db_max_connections,
            auth_issuer: std::env::var("AUTH_ISSUER").unwrap_or_default(),
            auth_jwks_uri: std::env::var("AUTH_JWKS_URI").unwrap_or_default(),
        }
    }
}
