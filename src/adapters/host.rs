//! In-process stand-in for the workflow host.
//!
//! Parameters come from a JSON object instead of the workflow editor, but they
//! are checked against the node description the same way the host checks them
//! before a node runs: required strings must be filled in, numbers respect
//! `minValue`, and collections only accept their declared options. Unset
//! parameters resolve to the property default.

use crate::core::description::{NodeProperty, NodeTypeDescription, PropertyType};
use crate::domain::ports::{ExecuteFunctions, NodeInfo};
use crate::utils::error::{NodeError, NodeOperationError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct StaticExecuteContext {
    node: NodeInfo,
    description: NodeTypeDescription,
    parameters: Map<String, Value>,
}

impl StaticExecuteContext {
    pub fn new(description: NodeTypeDescription, parameters: Map<String, Value>) -> Result<Self> {
        for name in parameters.keys() {
            if description.property(name).is_none() {
                return Err(NodeError::InvalidConfigValueError {
                    field: name.clone(),
                    value: parameters[name].to_string(),
                    reason: format!("Node '{}' has no such parameter", description.name),
                });
            }
        }

        for property in &description.properties {
            check_property(property, &property.name, parameters.get(&property.name))?;
        }

        let node = NodeInfo {
            name: description.defaults.name.clone(),
            node_type: description.name.clone(),
            type_version: description.version,
        };
        let accepted = Value::Object(parameters.clone());
        tracing::debug!("Parameters accepted for '{}': {}", node.name, accepted);

        Ok(Self {
            node,
            description,
            parameters,
        })
    }
}

fn check_property(property: &NodeProperty, field: &str, value: Option<&Value>) -> Result<()> {
    let value = match value {
        None | Some(Value::Null) if property.required => {
            return Err(NodeError::MissingConfigError {
                field: field.to_string(),
            })
        }
        None | Some(Value::Null) => return Ok(()),
        Some(value) => value,
    };

    match property.kind {
        PropertyType::String => {
            let text = value.as_str().ok_or_else(|| invalid(field, value, "Expected a string"))?;
            if property.required {
                validate_non_empty_string(field, text)?;
            }
        }
        PropertyType::Number => {
            let number = value.as_f64().ok_or_else(|| invalid(field, value, "Expected a number"))?;
            if let Some(min) = property.min_value() {
                if number < min {
                    return Err(invalid(field, value, &format!("Value must be at least {}", min)));
                }
            }
        }
        PropertyType::Collection => {
            let options = value
                .as_object()
                .ok_or_else(|| invalid(field, value, "Expected a collection of options"))?;
            for (name, option_value) in options {
                let option_field = format!("{}.{}", field, name);
                let option = property
                    .option(name)
                    .ok_or_else(|| invalid(&option_field, option_value, "Unknown option"))?;
                check_property(option, &option_field, Some(option_value))?;
            }
        }
    }
    Ok(())
}

fn invalid(field: &str, value: &Value, reason: &str) -> NodeError {
    NodeError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl ExecuteFunctions for StaticExecuteContext {
    fn get_node_parameter(
        &self,
        name: &str,
        _item_index: usize,
    ) -> std::result::Result<Value, NodeOperationError> {
        if let Some(value) = self.parameters.get(name).filter(|v| !v.is_null()) {
            return Ok(value.clone());
        }
        self.description
            .property(name)
            .map(|property| property.default.clone())
            .ok_or_else(|| {
                NodeOperationError::new(&self.node, format!("Could not get parameter '{}'", name))
            })
    }

    fn node(&self) -> &NodeInfo {
        &self.node
    }
}
