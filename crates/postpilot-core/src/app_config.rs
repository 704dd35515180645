use std::path::PathBuf;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub profile_path: PathBuf,
    pub gemini_api_key: String,
    pub gateway_base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub image_aspect_ratio: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// UTC hour at which autopilot posts are scheduled.
    pub publish_hour: u32,
    pub publish_step_delay_ms: u64,
    pub publish_settle_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("profile_path", &self.profile_path)
            .field("gemini_api_key", &"[redacted]")
            .field("gateway_base_url", &self.gateway_base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("image_aspect_ratio", &self.image_aspect_ratio)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("publish_hour", &self.publish_hour)
            .field("publish_step_delay_ms", &self.publish_step_delay_ms)
            .field("publish_settle_delay_ms", &self.publish_settle_delay_ms)
            .finish()
    }
}
