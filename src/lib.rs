pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::host::StaticExecuteContext;
pub use adapters::instagram::WebScraperFactory;
pub use config::{cli::LocalStorage, RunConfig};
pub use crate::core::{node::InstagramScraperNode, runner::NodeRunner};
pub use domain::model::{LibraryError, NodeExecutionData, ScrapeError, ScrapeResult, ScraperConfig};
pub use utils::error::{NodeError, NodeOperationError, Result};
