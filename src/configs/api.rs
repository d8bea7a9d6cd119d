use serde::{Deserialize, Serialize};

/// Connection and identity settings for the MovieBox mobile API.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base64-encoded HMAC key shared with the mobile app.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Tabs probed by the `tabs` command: `0..tab_scan_limit`.
    #[serde(default = "default_tab_scan_limit")]
    pub tab_scan_limit: u32,
    #[serde(default)]
    pub client_info: ClientInfoConfig,
}

fn default_base_url() -> String {
    "https://api.inmoviebox.com".to_string()
}

fn default_secret_key() -> String {
    "76iRl07s0xSN9jqmEWAt79EBJZulIQIsV64FZr2O".to_string()
}

fn default_user_agent() -> String {
    "com.community.mbox.in/50020042 (Linux; Android)".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_tab_scan_limit() -> u32 {
    8
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            secret_key: default_secret_key(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            tab_scan_limit: default_tab_scan_limit(),
            client_info: ClientInfoConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash; also the Referer sent to media hosts.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Device identity serialized into the `x-client-info` header.
///
/// Field order is the wire order.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClientInfoConfig {
    pub package_name: String,
    pub version_name: String,
    pub version_code: u64,
    pub os: String,
    pub os_version: String,
    pub device_id: String,
    pub install_store: String,
    pub brand: String,
    pub model: String,
    pub region: String,
    pub timezone: String,
}

impl Default for ClientInfoConfig {
    fn default() -> Self {
        Self {
            package_name: "com.community.mbox.in".to_string(),
            version_name: "3.0.03.0529.03".to_string(),
            version_code: 50020042,
            os: "android".to_string(),
            os_version: "16".to_string(),
            device_id: "da2b99c821e6ea023e4be55b54d5f7d8".to_string(),
            install_store: "ps".to_string(),
            brand: "google".to_string(),
            model: "sdk_gphone64_x86_64".to_string(),
            region: "IN".to_string(),
            timezone: "Asia/Calcutta".to_string(),
        }
    }
}

impl ClientInfoConfig {
    /// Compact JSON value for the `x-client-info` header.
    pub fn header_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
