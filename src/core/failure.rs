use crate::domain::model::{LibraryError, ScrapeCode};
use crate::domain::ports::NodeInfo;
use crate::utils::error::NodeOperationError;

pub const FAILURE_PREFIX: &str = "Failed to scrape Instagram";
pub const LIBRARY_FAILURE_FALLBACK: &str = "Unknown scraping error";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "An unknown error occurred while scraping Instagram.";

/// Every way a scrape can fail, as seen from the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeFailure {
    /// The library finished but reported `success = false`.
    LibraryFailure(Option<String>),
    Scrape { message: String, code: ScrapeCode },
    Generic(String),
    Unknown,
}

impl From<LibraryError> for ScrapeFailure {
    fn from(error: LibraryError) -> Self {
        match error {
            LibraryError::Scrape(e) => ScrapeFailure::Scrape {
                message: e.message,
                code: e.code,
            },
            LibraryError::Other(e) => ScrapeFailure::Generic(e.to_string()),
            LibraryError::NonError(_) => ScrapeFailure::Unknown,
        }
    }
}

impl ScrapeFailure {
    pub fn message(&self) -> String {
        match self {
            ScrapeFailure::LibraryFailure(error) => {
                let reason = error
                    .as_deref()
                    .filter(|e| !e.is_empty())
                    .unwrap_or(LIBRARY_FAILURE_FALLBACK);
                format!("{}: {}", FAILURE_PREFIX, reason)
            }
            ScrapeFailure::Scrape { message, code } => {
                format!("{}: {} (Code: {})", FAILURE_PREFIX, message, code)
            }
            ScrapeFailure::Generic(message) => format!("{}: {}", FAILURE_PREFIX, message),
            ScrapeFailure::Unknown => UNKNOWN_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn into_operation_error(self, node: &NodeInfo) -> NodeOperationError {
        NodeOperationError::new(node, self.message())
    }
}
