use super::lookup::HolidayLookup;
use crate::error::{Result, ToolError};
use crate::traits::{Tool, ToolOutput};
use async_trait::async_trait;
use holiday_core::{Context, ToolDefinition, ToolParameter};
use serde_json::Value;
use std::sync::Arc;

pub const TOOL_NAME: &str = "get_holidays";

/// Exposes [`HolidayLookup`] to the model as `get_holidays`.
pub struct GetHolidaysTool {
    def: ToolDefinition,
    lookup: Arc<HolidayLookup>,
}

impl GetHolidaysTool {
    pub fn new(lookup: Arc<HolidayLookup>) -> Self {
        let def = ToolDefinition::new(
            TOOL_NAME,
            "Get public holidays for a country through the Calendarific API. \
             Input is the country code and year separated by a comma, e.g. 'US,2024'. \
             The current year is used if the year is not specified.",
        )
        .with_required_param(
            "country",
            ToolParameter::string()
                .with_description("Country code, optionally followed by ',year' (e.g. 'TW,2024')"),
        );

        Self { def, lookup }
    }

    /// Models usually send `{"country": "US,2024"}`, sometimes split the year
    /// out, and occasionally send a bare string.
    fn argument(input: &Value) -> Result<String> {
        match input {
            Value::String(s) => Ok(s.clone()),
            Value::Object(obj) => {
                let country = obj
                    .get("country")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ToolError::invalid_input("'country' must be a string"))?;

                let year = match obj.get("year") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Number(n)) => Some(n.to_string()),
                    Some(_) => return Err(ToolError::invalid_input("'year' must be a number")),
                };

                Ok(match year {
                    Some(year) if !country.contains(',') => format!("{},{}", country, year),
                    _ => country.to_string(),
                })
            }
            _ => Err(ToolError::invalid_input(
                "expected {\"country\": \"CC,YYYY\"} or a string",
            )),
        }
    }
}

#[async_trait]
impl Tool for GetHolidaysTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    fn validate_input(&self, input: &Value) -> Result<()> {
        Self::argument(input).map(|_| ())
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let argument = Self::argument(&input)?;

        Ok(match self.lookup.listing(&argument).await {
            Ok(listing) => ToolOutput::text(listing.render()),
            Err(e) => ToolOutput::error(e.to_string()),
        })
    }
}
