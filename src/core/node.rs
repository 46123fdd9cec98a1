//! The Instagram Scraper node: turns host parameters into one library call and
//! the library's answer into workflow records.

use crate::core::description::{
    node_description, NodeTypeDescription, PARAM_LIMIT, PARAM_SCRAPER_CONFIG, PARAM_USERNAME,
};
use crate::core::failure::ScrapeFailure;
use crate::domain::model::{NodeExecutionData, ScrapeRequest, ScraperConfig};
use crate::domain::ports::{ExecuteFunctions, NodeInfo, ScraperFactory};
use crate::utils::error::NodeOperationError;
use serde_json::Value;

pub struct InstagramScraperNode<F: ScraperFactory> {
    factory: F,
}

impl<F: ScraperFactory> InstagramScraperNode<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn description(&self) -> NodeTypeDescription {
        node_description()
    }

    /// Runs the node once and returns a single batch of records.
    pub async fn execute<E: ExecuteFunctions + ?Sized>(
        &self,
        ctx: &E,
    ) -> Result<Vec<NodeExecutionData>, NodeOperationError> {
        let request = read_request(ctx)?;

        match self.scrape(&request).await {
            Ok(posts) => Ok(ctx.return_json_array(posts)),
            Err(failure) => Err(failure.into_operation_error(ctx.node())),
        }
    }

    /// Creates a fresh scraper, fetches once and classifies the outcome.
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<Value>, ScrapeFailure> {
        let config = request.config.clone().unwrap_or_default();
        let scraper = self.factory.create(config)?;
        let result = scraper.get_posts(&request.username, request.limit).await?;

        if !result.success {
            return Err(ScrapeFailure::LibraryFailure(result.error));
        }
        Ok(result.posts.unwrap_or_default())
    }
}

fn read_request<E: ExecuteFunctions + ?Sized>(ctx: &E) -> Result<ScrapeRequest, NodeOperationError> {
    let node = ctx.node();

    let username = match ctx.get_node_parameter(PARAM_USERNAME, 0)? {
        Value::String(username) => username,
        other => return Err(parameter_error(node, PARAM_USERNAME, "a string", &other)),
    };

    let limit_value = ctx.get_node_parameter(PARAM_LIMIT, 0)?;
    let limit = as_whole_number(&limit_value)
        .filter(|limit| *limit >= 1)
        .and_then(|limit| u32::try_from(limit).ok())
        .ok_or_else(|| parameter_error(node, PARAM_LIMIT, "a whole number of at least 1", &limit_value))?;

    let config = read_scraper_config(node, &ctx.get_node_parameter(PARAM_SCRAPER_CONFIG, 0)?)?;

    Ok(ScrapeRequest {
        username,
        limit,
        config: Some(config),
    })
}

/// Keeps only the options the caller set. Unset options stay `None`.
pub fn read_scraper_config(node: &NodeInfo, value: &Value) -> Result<ScraperConfig, NodeOperationError> {
    let options = match value {
        Value::Null => return Ok(ScraperConfig::default()),
        Value::Object(options) => options,
        other => return Err(parameter_error(node, PARAM_SCRAPER_CONFIG, "a collection", other)),
    };

    let field = |name: &str| -> Result<Option<u64>, NodeOperationError> {
        match options.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => as_whole_number(v).map(Some).ok_or_else(|| {
                parameter_error(
                    node,
                    &format!("{}.{}", PARAM_SCRAPER_CONFIG, name),
                    "a non-negative whole number",
                    v,
                )
            }),
        }
    };
    let small = |name: &str| -> Result<Option<u32>, NodeOperationError> {
        field(name)?
            .map(|n| {
                u32::try_from(n).map_err(|_| {
                    parameter_error(
                        node,
                        &format!("{}.{}", PARAM_SCRAPER_CONFIG, name),
                        "a number below 2^32",
                        &Value::from(n),
                    )
                })
            })
            .transpose()
    };

    Ok(ScraperConfig {
        max_retries: small("maxRetries")?,
        min_delay_ms: field("minDelay")?,
        max_delay_ms: field("maxDelay")?,
        timeout_ms: field("timeout")?,
        rate_limit_per_minute: small("rateLimitPerMinute")?,
    })
}

/// Hosts hand numbers over as JSON doubles, so `20.0` counts as `20`.
fn as_whole_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

fn parameter_error(node: &NodeInfo, name: &str, expected: &str, got: &Value) -> NodeOperationError {
    NodeOperationError::new(
        node,
        format!("Parameter '{}' must be {}, got {}", name, expected, got),
    )
}
