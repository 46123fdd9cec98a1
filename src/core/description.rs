//! Static description of the node as the workflow host sees it.

use serde::{Deserialize, Serialize};
use serde_json::json;

pub const NODE_TYPE: &str = "instagramScraper";
pub const NODE_DISPLAY_NAME: &str = "Instagram Scraper";
pub const NODE_VERSION: u32 = 1;

/// Canonical default for `limit` in node version 1.
pub const DEFAULT_LIMIT: u32 = 50;

pub const DEFAULT_MAX_DELAY_MS: u64 = 5000;
pub const DEFAULT_MIN_DELAY_MS: u64 = 2000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 30;
pub const DEFAULT_TIMEOUT_MS: u64 = 10000;

pub const PARAM_USERNAME: &str = "username";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_SCRAPER_CONFIG: &str = "scraperConfig";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Collection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    pub min_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    pub default: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<NodeProperty>,
}

impl NodeProperty {
    pub fn option(&self, name: &str) -> Option<&NodeProperty> {
        self.options.iter().find(|option| option.name == name)
    }

    pub fn min_value(&self) -> Option<f64> {
        self.type_options.as_ref().map(|options| options.min_value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefaults {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDescription {
    pub display_name: String,
    pub name: String,
    pub icon: String,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: NodeDefaults,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub properties: Vec<NodeProperty>,
}

impl NodeTypeDescription {
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|property| property.name == name)
    }
}

fn tuning_option(display_name: &str, name: &str, default: u64, description: &str) -> NodeProperty {
    NodeProperty {
        display_name: display_name.to_string(),
        name: name.to_string(),
        kind: PropertyType::Number,
        required: false,
        default: json!(default),
        placeholder: None,
        description: Some(format!("{} (default: {})", description, default)),
        type_options: Some(TypeOptions { min_value: 0.0 }),
        options: Vec::new(),
    }
}

pub fn node_description() -> NodeTypeDescription {
    // collection options are listed alphabetically, as the host editor expects
    let scraper_options = vec![
        tuning_option(
            "Max Delay (Ms)",
            "maxDelay",
            DEFAULT_MAX_DELAY_MS,
            "Maximum delay between requests in milliseconds",
        ),
        tuning_option(
            "Max Retries",
            "maxRetries",
            u64::from(DEFAULT_MAX_RETRIES),
            "Maximum number of retry attempts",
        ),
        tuning_option(
            "Min Delay (Ms)",
            "minDelay",
            DEFAULT_MIN_DELAY_MS,
            "Minimum delay between requests in milliseconds",
        ),
        tuning_option(
            "Rate Limit Per Minute",
            "rateLimitPerMinute",
            u64::from(DEFAULT_RATE_LIMIT_PER_MINUTE),
            "Maximum requests per minute",
        ),
        tuning_option(
            "Timeout (Ms)",
            "timeout",
            DEFAULT_TIMEOUT_MS,
            "Request timeout in milliseconds",
        ),
    ];

    NodeTypeDescription {
        display_name: NODE_DISPLAY_NAME.to_string(),
        name: NODE_TYPE.to_string(),
        icon: "file:instagram.svg".to_string(),
        group: vec!["transform".to_string()],
        version: NODE_VERSION,
        description: "Scrapes posts from a public Instagram profile.".to_string(),
        defaults: NodeDefaults {
            name: NODE_DISPLAY_NAME.to_string(),
        },
        inputs: vec!["main".to_string()],
        outputs: vec!["main".to_string()],
        properties: vec![
            NodeProperty {
                display_name: "Username".to_string(),
                name: PARAM_USERNAME.to_string(),
                kind: PropertyType::String,
                required: true,
                default: json!(""),
                placeholder: Some("e.g., n8n.io".to_string()),
                description: Some("The public Instagram profile username to scrape".to_string()),
                type_options: None,
                options: Vec::new(),
            },
            NodeProperty {
                display_name: "Limit".to_string(),
                name: PARAM_LIMIT.to_string(),
                kind: PropertyType::Number,
                required: false,
                default: json!(DEFAULT_LIMIT),
                placeholder: None,
                description: Some("Max number of results to return".to_string()),
                type_options: Some(TypeOptions { min_value: 1.0 }),
                options: Vec::new(),
            },
            NodeProperty {
                display_name: "Scraper Configuration".to_string(),
                name: PARAM_SCRAPER_CONFIG.to_string(),
                kind: PropertyType::Collection,
                required: false,
                default: json!({}),
                placeholder: Some("Add Option".to_string()),
                description: None,
                type_options: None,
                options: scraper_options,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_exposes_three_inputs() {
        let description = node_description();
        let names: Vec<&str> = description
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["username", "limit", "scraperConfig"]);

        let username = description.property("username").unwrap();
        assert!(username.required);

        let limit = description.property("limit").unwrap();
        assert_eq!(limit.default, json!(50));
        assert_eq!(limit.min_value(), Some(1.0));
    }

    #[test]
    fn test_scraper_config_defaults() {
        let description = node_description();
        let config = description.property("scraperConfig").unwrap();
        assert_eq!(config.default, json!({}));
        assert_eq!(config.option("maxDelay").unwrap().default, json!(5000));
        assert_eq!(config.option("minDelay").unwrap().default, json!(2000));
        assert_eq!(config.option("maxRetries").unwrap().default, json!(3));
        assert_eq!(config.option("rateLimitPerMinute").unwrap().default, json!(30));
        assert_eq!(config.option("timeout").unwrap().default, json!(10000));
        assert!(config.options.iter().all(|o| o.min_value() == Some(0.0)));
    }

    #[test]
    fn test_description_serializes_in_host_shape() {
        let value = serde_json::to_value(node_description()).unwrap();
        assert_eq!(value["name"], "instagramScraper");
        assert_eq!(value["displayName"], "Instagram Scraper");
        assert_eq!(value["properties"][1]["typeOptions"]["minValue"], 1.0);
        assert_eq!(value["properties"][2]["type"], "collection");
        assert!(value["properties"][1].get("required").is_none());
    }
}
