// src/config/consts.rs

// Net config
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/plm-api/";
pub const HTTP_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = "plm_scrape/0.4";

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = ".store/debug.log";
pub const PREFS_FILE: &str = ".store/prefs.cfg";

// Address watch (in-place part transitions on the DigiKey layout)
pub const WATCH_INTERVAL_MS: u64 = 500;
