pub const DEFAULT_BASE_URL: &str = "https://app.pachca.com/api/v3";

pub fn default_timeout_secs() -> u64 {
    30
}

pub fn default_log_level() -> String {
    "info".to_string()
}
