use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Contents of `~/.tess/config.toml`
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    /// Performance-management API key. A bare key is sent as a Bearer token.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout for API calls
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    /// Maximum number of review records fetched for one reviewee
    #[serde(default = "default_review_limit")]
    pub review_limit: usize,

    /// rclone remote used for uploads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rclone_remote: Option<String>,

    /// Drive file ID of the hub template document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_hub_id: Option<String>,

    /// Drive file ID of the cover template document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_cover_id: Option<String>,

    /// Drive file ID of the review template document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_review_id: Option<String>,
}
