use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonSchemaType {
    String,
    Integer,
    Boolean,
    Object,
}

/// A JSON-schema fragment describing one tool argument.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolParameter {
    #[serde(rename = "type")]
    pub schema_type: JsonSchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, ToolParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ToolParameter {
    fn of(schema_type: JsonSchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            default: None,
            properties: None,
            required: None,
        }
    }

    pub fn string() -> Self {
        Self::of(JsonSchemaType::String)
    }

    pub fn integer() -> Self {
        Self::of(JsonSchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(JsonSchemaType::Boolean)
    }

    pub fn object() -> Self {
        Self {
            properties: Some(BTreeMap::new()),
            required: Some(vec![]),
            ..Self::of(JsonSchemaType::Object)
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// What a model runtime sees of a tool: its name, a natural-language
/// description it uses to decide applicability, and the argument schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: ToolParameter,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ToolParameter::object(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, param: ToolParameter) -> Self {
        if let Some(props) = &mut self.parameters.properties {
            props.insert(name.into(), param);
        }
        self
    }

    pub fn with_required_param(self, name: impl Into<String>, param: ToolParameter) -> Self {
        let name = name.into();
        self.with_param(name.clone(), param).require_param(name)
    }

    pub fn require_param(mut self, name: impl Into<String>) -> Self {
        if let Some(req) = &mut self.parameters.required {
            req.push(name.into());
        }
        self
    }

    pub fn param(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.properties.as_ref()?.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.parameters
            .required
            .as_ref()
            .map(|req| req.iter().any(|r| r == name))
            .unwrap_or(false)
    }
}
