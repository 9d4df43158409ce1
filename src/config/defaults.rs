pub const DEFAULT_BASE_URL: &str = "https://api.latticehq.com/";

pub fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub fn default_timeout_sec() -> u64 {
    15
}

pub fn default_review_limit() -> usize {
    100
}

pub fn default_rclone_remote() -> String {
    "drive".to_string()
}

pub fn default_config_dir_name() -> &'static str {
    ".tess"
}

pub fn default_config_file_name() -> &'static str {
    "config.toml"
}
