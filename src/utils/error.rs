use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShoppiesError {
    #[error("API request failed: {0}")]
    HttpError(#[source] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("{message}")]
    ApiError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{id} is already nominated")]
    AlreadyNominated { id: String },

    #[error("You reach the max nomination limit: {limit}")]
    NominationLimitReached { limit: usize },

    #[error("{id} is not in the nomination list")]
    NotNominated { id: String },

    #[error("No search result at position {index}")]
    NoSuchResult { index: usize },

    #[error("Nothing to Share")]
    NothingToShare,

    #[error("Invalid share link: {reason}")]
    InvalidShareLink { reason: String },

    #[error("Share Link has no content")]
    EmptyShareLink,

    #[error("Got error while loading shared movies. {source}")]
    RestoreError {
        #[source]
        source: Box<ShoppiesError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Storage,
    Configuration,
    Nomination,
    Share,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// The request URL carries the API key as a query parameter, so it is
/// dropped before the error can reach a message or a log line.
impl From<reqwest::Error> for ShoppiesError {
    fn from(e: reqwest::Error) -> Self {
        Self::HttpError(e.without_url())
    }
}

impl ShoppiesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::ApiError { .. } => ErrorCategory::Api,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::AlreadyNominated { .. }
            | Self::NominationLimitReached { .. }
            | Self::NotNominated { .. }
            | Self::NoSuchResult { .. } => ErrorCategory::Nomination,
            Self::UrlError(_)
            | Self::NothingToShare
            | Self::InvalidShareLink { .. }
            | Self::EmptyShareLink => ErrorCategory::Share,
            Self::RestoreError { source } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // The user can simply try something else
            Self::ApiError { .. }
            | Self::AlreadyNominated { .. }
            | Self::NominationLimitReached { .. }
            | Self::NotNominated { .. }
            | Self::NoSuchResult { .. }
            | Self::NothingToShare => ErrorSeverity::Low,
            Self::HttpError(_) | Self::HttpStatusError { .. } => ErrorSeverity::Medium,
            Self::UrlError(_)
            | Self::InvalidShareLink { .. }
            | Self::EmptyShareLink
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::RestoreError { source } => source.severity().max(ErrorSeverity::Medium),
            Self::IoError(_)
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "Check your network connection and retry",
            Self::HttpStatusError { status, .. } if *status == 401 => {
                "Check that your OMDb API key is valid (set OMDB_API_KEY or --api-key)"
            }
            Self::HttpStatusError { .. } => "The movie database may be unavailable, retry later",
            Self::ApiError { .. } => "Try a more specific title or a different spelling",
            Self::IoError(_) => "Check that the storage directory exists and is writable",
            Self::SerializationError(_) => "The stored or received data is malformed",
            Self::UrlError(_) => "Check the URL format (it must start with http:// or https://)",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            Self::MissingConfigError { .. } => {
                "Provide the missing value in the config file, environment or command line"
            }
            Self::AlreadyNominated { .. } => "Pick a movie that is not nominated yet",
            Self::NominationLimitReached { .. } => "Remove a nomination before adding another",
            Self::NotNominated { .. } => "Run `shoppies list` to see the current nominations",
            Self::NoSuchResult { .. } => "Search first, then nominate by result number",
            Self::NothingToShare => "Nominate at least one movie before sharing",
            Self::InvalidShareLink { .. } | Self::EmptyShareLink => {
                "Ask for a fresh share link ending in /share?ids=..."
            }
            Self::RestoreError { .. } => "Retry later or open a different share link",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) if e.is_timeout() => "The movie database did not answer in time".to_string(),
            Self::HttpError(_) => "Could not reach the movie database".to_string(),
            Self::HttpStatusError { status, .. } => {
                format!("The movie database answered with HTTP {}", status)
            }
            Self::ApiError { message } => format!("Error: {}", message),
            Self::RestoreError { source } => format!(
                "Error: Got error while loading shared movies. {}",
                source
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShoppiesError>;
