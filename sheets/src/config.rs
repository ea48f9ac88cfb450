use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://sheets.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8787";

/// Runtime configuration, read from `SHEETS_*` environment variables
/// (a `.env` file is loaded first when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Empty means same-origin only.
    pub cors_allowed_origins: Vec<String>,
    /// Served for any path the API does not claim (the browser bundle).
    pub static_dir: Option<PathBuf>,
    /// Where the `sheet` client commands send requests.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cors_allowed_origins: Vec::new(),
            static_dir: None,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database_url: non_empty("SHEETS_DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: non_empty("SHEETS_BIND_ADDR").unwrap_or(defaults.bind_addr),
            cors_allowed_origins: lookup("SHEETS_CORS_ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            static_dir: non_empty("SHEETS_STATIC_DIR").map(PathBuf::from),
            api_url: non_empty("SHEETS_API_URL").unwrap_or(defaults.api_url),
        }
    }

    /// Database URL with query params stripped and any inline password masked.
    pub fn redacted_database_url(&self) -> String {
        let url = self.database_url.as_str();
        let base = url.split('?').next().unwrap_or(url);
        if let Some(at) = base.rfind('@')
            && let Some(scheme_end) = base.find("://")
        {
            let userinfo = &base[scheme_end + 3..at];
            if let Some((user, _)) = userinfo.split_once(':') {
                return format!("{}://{}:****{}", &base[..scheme_end], user, &base[at..]);
            }
        }
        base.to_string()
    }
}
