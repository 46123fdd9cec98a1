use crate::domain::ports::NodeInfo;
use thiserror::Error;

/// Error raised to the workflow host, tied to the node instance that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NodeOperationError {
    pub node: NodeInfo,
    pub message: String,
}

impl NodeOperationError {
    pub fn new(node: &NodeInfo, message: impl Into<String>) -> Self {
        Self {
            node: node.clone(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Node execution failed: {0}")]
    OperationError(#[from] NodeOperationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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
}

impl NodeError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            NodeError::OperationError(e) => e.message.clone(),
            NodeError::IoError(e) => format!("Could not read or write a file: {}", e),
            NodeError::SerializationError(e) => format!("Could not encode the output: {}", e),
            NodeError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            NodeError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is not valid: {}", field, reason)
            }
            NodeError::MissingConfigError { field } => {
                format!("'{}' is required but was not provided", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NodeError::OperationError(_) => {
                "Check that the profile is public, then retry later or raise --max-retries / --timeout"
            }
            NodeError::IoError(_) => "Check that the output directory exists and is writable",
            NodeError::SerializationError(_) => "Report the profile that produced this output",
            NodeError::ConfigValidationError { .. } => "Fix the TOML parameter file and try again",
            NodeError::InvalidConfigValueError { .. } | NodeError::MissingConfigError { .. } => {
                "Run with --help to see the accepted parameters"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            NodeError::ConfigValidationError { .. }
            | NodeError::InvalidConfigValueError { .. }
            | NodeError::MissingConfigError { .. } => 1,
            NodeError::OperationError(_) => 2,
            NodeError::IoError(_) | NodeError::SerializationError(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, NodeError>;
