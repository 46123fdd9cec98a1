use crate::core::description::{PARAM_LIMIT, PARAM_SCRAPER_CONFIG, PARAM_USERNAME};
use crate::utils::error::{NodeError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Node parameters kept in a TOML file.
///
/// ```toml
/// [node]
/// username = "n8n.io"
/// limit = 20
///
/// [scraper_config]
/// max_retries = 2
/// min_delay = 1000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub node: NodeSection,
    pub scraper_config: Option<ScraperConfigSection>,
    pub source: Option<SourceSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeSection {
    pub username: Option<String>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScraperConfigSection {
    pub max_retries: Option<u32>,
    pub min_delay: Option<u64>,
    pub max_delay: Option<u64>,
    pub timeout: Option<u64>,
    pub rate_limit_per_minute: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: String,
}

impl TomlConfig {
    /// Loads node parameters from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NodeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NodeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment variable's value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NodeError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.base_url.as_str())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }

    /// Node parameters in the host's naming. Unset values are left out.
    pub fn to_parameters(&self) -> Map<String, Value> {
        let mut parameters = Map::new();
        if let Some(username) = &self.node.username {
            parameters.insert(PARAM_USERNAME.to_string(), Value::from(username.clone()));
        }
        if let Some(limit) = self.node.limit {
            parameters.insert(PARAM_LIMIT.to_string(), Value::from(limit));
        }

        if let Some(section) = &self.scraper_config {
            let mut options = Map::new();
            let mut set = |name: &str, value: Option<u64>| {
                if let Some(value) = value {
                    options.insert(name.to_string(), Value::from(value));
                }
            };
            set("maxRetries", section.max_retries.map(u64::from));
            set("minDelay", section.min_delay);
            set("maxDelay", section.max_delay);
            set("timeout", section.timeout);
            set("rateLimitPerMinute", section.rate_limit_per_minute.map(u64::from));
            parameters.insert(PARAM_SCRAPER_CONFIG.to_string(), Value::Object(options));
        }
        parameters
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(limit) = self.node.limit {
            validate_positive_number("node.limit", limit, 1)?;
        }
        if let Some(base_url) = self.base_url() {
            validate_url("source.base_url", base_url)?;
        }
        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }
        Ok(())
    }
}
