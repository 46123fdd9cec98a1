pub mod description;
pub mod failure;
pub mod node;
pub mod runner;

pub use crate::domain::model::{NodeExecutionData, ScrapeRequest, ScrapeResult, ScraperConfig};
pub use crate::domain::ports::{ExecuteFunctions, NodeInfo, PostScraper, ScraperFactory, Storage};
pub use crate::utils::error::Result;
