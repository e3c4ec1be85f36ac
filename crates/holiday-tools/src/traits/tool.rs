use crate::error::{Result, ToolError};
use async_trait::async_trait;
use holiday_core::{Context, ToolDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text handed back to the model. `is_error` marks failures the model should
/// still read and react to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput>;

    /// Rejects object inputs missing a required parameter. Tools that accept
    /// other input shapes override this.
    fn validate_input(&self, input: &Value) -> Result<()> {
        let def = self.definition();
        let Some(obj) = input.as_object() else {
            return Ok(());
        };
        for name in def.parameters.required.iter().flatten() {
            if !obj.contains_key(name) {
                return Err(ToolError::invalid_input(format!(
                    "{}: missing required parameter '{}'",
                    def.name, name
                )));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.definition().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holiday_core::ToolParameter;

    struct NeedsCountry {
        def: ToolDefinition,
    }

    #[async_trait]
    impl Tool for NeedsCountry {
        fn definition(&self) -> &ToolDefinition {
            &self.def
        }

        async fn execute(&self, _ctx: &Context, _input: Value) -> Result<ToolOutput> {
            Ok(ToolOutput::text("ok"))
        }
    }

    #[test]
    fn test_tool_output_text() {
        let output = ToolOutput::text("- Christmas (2024-12-25)");
        assert_eq!(output.content, "- Christmas (2024-12-25)");
        assert!(!output.is_error);
    }

    #[test]
    fn test_tool_output_error() {
        let output = ToolOutput::error("Something went wrong");
        assert!(output.is_error);
        assert_eq!(output.content, "Something went wrong");
    }

    #[test]
    fn test_default_validation_checks_required() {
        let tool = NeedsCountry {
            def: ToolDefinition::new("t", "test")
                .with_required_param("country", ToolParameter::string()),
        };

        assert!(tool.validate_input(&serde_json::json!({"country": "US"})).is_ok());
        assert!(matches!(
            tool.validate_input(&serde_json::json!({"year": 2024})),
            Err(ToolError::InvalidInput(_))
        ));
        assert!(tool.validate_input(&Value::String("US".into())).is_ok());
    }
}
