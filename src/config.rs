use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    /// Mobile bookings must name this region in their address. `None` disables the check.
    pub service_region: Option<String>,
    pub studio_address: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "glowbook.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            service_region: match env::var("SERVICE_REGION") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v.trim().to_string()),
                Err(_) => Some("Ontario".to_string()),
            },
            studio_address: env::var("STUDIO_ADDRESS")
                .unwrap_or_else(|_| "123 Beauty Lane, Toronto, Ontario, M5B 2H1".to_string()),
        }
    }
}
