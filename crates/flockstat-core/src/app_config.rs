use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, loaded once at startup and handed to whatever
/// needs them. The series transform itself never looks at this.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub youtube_api_key: String,
    pub youtube_base_url: String,
    pub channel_id: String,
    /// Upper bound on the number of uploads fetched per request.
    pub max_videos: usize,
    pub youtube_timeout_secs: u64,
    pub youtube_max_retries: u32,
    pub youtube_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("youtube_api_key", &"[redacted]")
            .field("youtube_base_url", &self.youtube_base_url)
            .field("channel_id", &self.channel_id)
            .field("max_videos", &self.max_videos)
            .field("youtube_timeout_secs", &self.youtube_timeout_secs)
            .field("youtube_max_retries", &self.youtube_max_retries)
            .field("youtube_backoff_base_ms", &self.youtube_backoff_base_ms)
            .finish()
    }
}
