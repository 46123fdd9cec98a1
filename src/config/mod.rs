pub mod cli;
pub mod toml_config;

use crate::adapters::instagram::DEFAULT_BASE_URL;
use crate::core::description::{PARAM_LIMIT, PARAM_SCRAPER_CONFIG, PARAM_USERNAME};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use serde_json::{Map, Value};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "instagram-scraper-node")]
#[command(about = "Scrapes posts from a public Instagram profile into workflow records")]
pub struct CliConfig {
    /// Public profile username to scrape
    #[arg(short, long)]
    pub username: Option<String>,

    /// Max number of results to return
    #[arg(short, long)]
    pub limit: Option<u64>,

    #[arg(long, help = "Maximum number of retry attempts")]
    pub max_retries: Option<u32>,

    #[arg(long, help = "Minimum delay between requests in milliseconds")]
    pub min_delay: Option<u64>,

    #[arg(long, help = "Maximum delay between requests in milliseconds")]
    pub max_delay: Option<u64>,

    #[arg(long, help = "Request timeout in milliseconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Maximum requests per minute")]
    pub rate_limit_per_minute: Option<u32>,

    /// TOML file with node parameters; flags override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory to write posts.json into
    #[arg(short, long)]
    pub output: Option<String>,

    /// Instagram endpoint root
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, help = "Print the node description as JSON and exit")]
    pub describe: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the parameter file if given and lays the flags over it.
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("Loading node parameters from {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let mut run = RunConfig::from_toml(&file);
        if let Some(username) = &self.username {
            run.parameters
                .insert(PARAM_USERNAME.to_string(), Value::from(username.clone()));
        }
        if let Some(limit) = self.limit {
            validate_positive_number("limit", limit, 1)?;
            run.parameters.insert(PARAM_LIMIT.to_string(), Value::from(limit));
        }

        let overrides = [
            ("maxRetries", self.max_retries.map(u64::from)),
            ("minDelay", self.min_delay),
            ("maxDelay", self.max_delay),
            ("timeout", self.timeout),
            ("rateLimitPerMinute", self.rate_limit_per_minute.map(u64::from)),
        ];
        if overrides.iter().any(|(_, value)| value.is_some()) {
            let options = run
                .parameters
                .entry(PARAM_SCRAPER_CONFIG.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(options) = options {
                for (name, value) in overrides {
                    if let Some(value) = value {
                        options.insert(name.to_string(), Value::from(value));
                    }
                }
            }
        }

        if let Some(base_url) = &self.base_url {
            run.base_url = base_url.clone();
        }
        if let Some(output) = &self.output {
            run.output_path = Some(output.clone());
        }
        Ok(run)
    }
}

/// Everything one run of the node needs, after file and flags are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub parameters: Map<String, Value>,
    pub base_url: String,
    pub output_path: Option<String>,
}

impl RunConfig {
    pub fn from_toml(file: &TomlConfig) -> Self {
        Self {
            parameters: file.to_parameters(),
            base_url: file.base_url().unwrap_or(DEFAULT_BASE_URL).to_string(),
            output_path: file.output_path().map(str::to_string),
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(path) = &self.output_path {
            validate_path("output", path)?;
        }
        Ok(())
    }
}
