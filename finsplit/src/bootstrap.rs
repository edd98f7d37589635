use std::env;

const DEFAULT_POOL_ID: u64 = 1;

/// Runtime configuration sourced from the environment.
pub struct AppConfig {
    pub pool_id: u64,
    pub payment_note: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let pool_id = match env::var("FINSPLIT_POOL_ID") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(%raw, "FINSPLIT_POOL_ID is not a number; using the default");
                DEFAULT_POOL_ID
            }),
            Err(_) => DEFAULT_POOL_ID,
        };
        let payment_note = env::var("FINSPLIT_PAYMENT_NOTE")
            .ok()
            .filter(|note| !note.is_empty());

        Self {
            pool_id,
            payment_note,
        }
    }
}

/// Initialize logging and tracing
pub fn init_logging() {
    tracing_subscriber::fmt::init();
}
