use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the timesheet backend, e.g. `https://timesheet.internal`.
    pub base_url: String,
    /// Company whose projects the admin screens operate on.
    pub company_id: i64,
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("TIMEDESK_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let base_url = env::var("TIMEDESK_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());

        let company_id: i64 = env::var("TIMEDESK_COMPANY_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        Self {
            base_url,
            company_id,
            dev_mode,
        }
    }
}
