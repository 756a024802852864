use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Upstream service returned {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("No output from {stage} stage")]
    EmptyResponse { stage: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Upstream,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PriceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PriceError::ConfigError { .. }
            | PriceError::MissingConfigError { .. }
            | PriceError::InvalidConfigValueError { .. }
            | PriceError::TomlError(_) => ErrorCategory::Configuration,
            PriceError::ApiError(_) => ErrorCategory::Network,
            PriceError::UpstreamError { .. } | PriceError::EmptyResponse { .. } => {
                ErrorCategory::Upstream
            }
            PriceError::SerializationError(_) => ErrorCategory::Data,
            PriceError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PriceError::MissingConfigError { field } => {
                format!("必要設定缺失: {}", field)
            }
            PriceError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值無效 ({}): {}", field, reason)
            }
            PriceError::UpstreamError { status, .. } => {
                format!("價格搜尋服務回應錯誤 (HTTP {})", status)
            }
            PriceError::ApiError(_) => "無法連線到價格搜尋服務".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the config file and the OPENAI_* environment variables"
            }
            ErrorCategory::Network => "Check network connectivity and OPENAI_BASE_URL",
            ErrorCategory::Upstream => "Verify the API key and model, then try again later",
            ErrorCategory::Data => "The service returned unexpected data; try a more specific query",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceError>;
