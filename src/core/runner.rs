use crate::core::node::InstagramScraperNode;
use crate::domain::model::NodeExecutionData;
use crate::domain::ports::{ExecuteFunctions, ScraperFactory, Storage};
use crate::utils::error::Result;

pub const OUTPUT_FILE: &str = "posts.json";

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: Vec<NodeExecutionData>,
    pub output_path: Option<String>,
}

/// Drives one node execution outside a workflow host and optionally keeps the batch.
pub struct NodeRunner<F: ScraperFactory, S: Storage> {
    node: InstagramScraperNode<F>,
    storage: Option<S>,
}

impl<F: ScraperFactory, S: Storage> NodeRunner<F, S> {
    pub fn new(node: InstagramScraperNode<F>) -> Self {
        Self { node, storage: None }
    }

    pub fn with_storage(node: InstagramScraperNode<F>, storage: S) -> Self {
        Self {
            node,
            storage: Some(storage),
        }
    }

    pub async fn run<E: ExecuteFunctions + ?Sized>(&self, ctx: &E) -> Result<RunSummary> {
        tracing::info!("Executing node '{}'", ctx.node().name);

        let records = self.node.execute(ctx).await?;
        tracing::info!("Node produced {} records", records.len());

        let output_path = match &self.storage {
            Some(storage) => {
                let body = serde_json::to_vec_pretty(&records)?;
                storage.write_file(OUTPUT_FILE, &body).await?;
                tracing::debug!("Wrote {} bytes to {}", body.len(), OUTPUT_FILE);
                Some(OUTPUT_FILE.to_string())
            }
            None => None,
        };

        Ok(RunSummary {
            records,
            output_path,
        })
    }
}
