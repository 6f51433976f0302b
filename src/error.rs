use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: no authorizer claims on request")]
    Unauthorized,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Failed to connect to FastAPI: HTTP Error {status} - {reason}")]
    UpstreamHttp { status: u16, reason: String },

    #[error("Failed to connect to FastAPI: URL Error - {0}")]
    Transport(String),

    #[error("{0}")]
    ContractViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Lambda runtime error: {0}")]
    Lambda(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    pub fn contract(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status reported to the caller for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UpstreamHttp { status, .. } => *status,
            Self::Unauthorized => 401,
            _ => 500,
        }
    }

    /// Human-readable message placed in the envelope's `error` field.
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}
