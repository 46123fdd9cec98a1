use crate::domain::model::{LibraryError, NodeExecutionData, ScrapeResult, ScraperConfig};
use crate::utils::error::{NodeOperationError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// A scraper instance built for one invocation.
#[async_trait]
pub trait PostScraper: Send + Sync {
    async fn get_posts(&self, username: &str, limit: u32) -> std::result::Result<ScrapeResult, LibraryError>;
}

/// Builds scraper instances. The node calls it once per execution.
pub trait ScraperFactory: Send + Sync {
    fn create(&self, config: ScraperConfig) -> std::result::Result<Box<dyn PostScraper>, LibraryError>;
}

/// Identity of the node instance inside a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub type_version: u32,
}

/// What the workflow host exposes to a running node.
pub trait ExecuteFunctions: Send + Sync {
    fn get_node_parameter(
        &self,
        name: &str,
        item_index: usize,
    ) -> std::result::Result<serde_json::Value, NodeOperationError>;

    fn node(&self) -> &NodeInfo;

    /// Wraps plain JSON values into output records, keeping their order.
    fn return_json_array(&self, items: Vec<serde_json::Value>) -> Vec<NodeExecutionData> {
        items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Object(json) => NodeExecutionData { json },
                other => {
                    let mut json = serde_json::Map::new();
                    json.insert("data".to_string(), other);
                    NodeExecutionData { json }
                }
            })
            .collect()
    }
}
