use super::error::LookupError;
use super::query::HolidayQuery;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SUCCESS_CODE: i64 = 200;

/// One holiday as reported by the API. `iso_date` is kept verbatim; some
/// entries carry a time component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub name: String,
    pub iso_date: String,
}

impl HolidayRecord {
    pub fn render(&self) -> String {
        format!("- {} ({})", self.name, self.iso_date)
    }
}

/// Holidays for one (country, year), in the order the API returned them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayListing {
    pub country: String,
    pub year: i32,
    pub holidays: Vec<HolidayRecord>,
}

#[derive(Deserialize)]
struct Envelope {
    meta: Meta,
    // An empty array on errors, an object on success.
    #[serde(default)]
    response: Value,
}

#[derive(Deserialize)]
struct Meta {
    code: i64,
    #[serde(default)]
    error_type: Option<String>,
}

#[derive(Deserialize)]
struct Payload {
    holidays: Vec<RawHoliday>,
}

#[derive(Deserialize)]
struct RawHoliday {
    name: String,
    date: RawDate,
}

#[derive(Deserialize)]
struct RawDate {
    iso: String,
}

impl HolidayListing {
    pub fn new(query: &HolidayQuery, holidays: Vec<HolidayRecord>) -> Self {
        Self {
            country: query.country.clone(),
            year: query.year,
            holidays,
        }
    }

    pub fn from_response_body(body: &str, query: &HolidayQuery) -> Result<Self, LookupError> {
        let shape_error = |e: serde_json::Error| LookupError::Shape {
            reason: e.to_string(),
            raw: body.to_string(),
        };

        let envelope: Envelope = serde_json::from_str(body).map_err(shape_error)?;

        if envelope.meta.code != SUCCESS_CODE {
            return Err(LookupError::Api {
                code: envelope.meta.code,
                error_type: envelope
                    .meta
                    .error_type
                    .unwrap_or_else(|| "unknown".to_string()),
            });
        }

        let payload: Payload = serde_json::from_value(envelope.response).map_err(shape_error)?;

        let holidays = payload
            .holidays
            .into_iter()
            .map(|h| HolidayRecord {
                name: h.name,
                iso_date: h.date.iso,
            })
            .collect();

        Ok(Self::new(query, holidays))
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// One `- {name} ({iso})` line per holiday, or a sentence saying there
    /// are none. Never empty.
    pub fn render(&self) -> String {
        if self.holidays.is_empty() {
            return format!("No holidays found for {} in {}.", self.country, self.year);
        }
        self.holidays
            .iter()
            .map(HolidayRecord::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Exact match on the (date, name) pair.
    pub fn contains(&self, iso_date: &str, name: &str) -> bool {
        self.holidays
            .iter()
            .any(|h| h.iso_date == iso_date && h.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> HolidayQuery {
        HolidayQuery::new("US", 2024)
    }

    #[test]
    fn test_single_holiday_renders_exactly() {
        let body = r#"{"meta":{"code":200},"response":{"holidays":[{"name":"Christmas","date":{"iso":"2024-12-25"}}]}}"#;
        let listing = HolidayListing::from_response_body(body, &query()).unwrap();
        assert_eq!(listing.render(), "- Christmas (2024-12-25)");
    }

    #[test]
    fn test_order_preserved() {
        let body = r#"{"meta":{"code":200},"response":{"holidays":[
            {"name":"New Year's Eve","date":{"iso":"2024-12-31"}},
            {"name":"New Year's Day","date":{"iso":"2024-01-01"}}
        ]}}"#;
        let listing = HolidayListing::from_response_body(body, &query()).unwrap();
        assert_eq!(
            listing.render(),
            "- New Year's Eve (2024-12-31)\n- New Year's Day (2024-01-01)"
        );
    }

    #[test]
    fn test_empty_listing() {
        let body = r#"{"meta":{"code":200},"response":{"holidays":[]}}"#;
        let listing = HolidayListing::from_response_body(body, &query()).unwrap();
        let text = listing.render();

        assert!(listing.is_empty());
        assert_eq!(text, "No holidays found for US in 2024.");
        assert!(!text.lines().any(|l| l.starts_with('-')));
    }

    #[test]
    fn test_api_error() {
        let body = r#"{"meta":{"code":426,"error_type":"upgrade required","error_detail":"..."},"response":[]}"#;
        assert_eq!(
            HolidayListing::from_response_body(body, &query()),
            Err(LookupError::Api {
                code: 426,
                error_type: "upgrade required".into()
            })
        );

        let body = r#"{"meta":{"code":500}}"#;
        let err = HolidayListing::from_response_body(body, &query()).unwrap_err();
        assert_eq!(err.to_string(), "API Error: 500 - unknown");
    }

    #[test]
    fn test_shape_error_carries_raw_body() {
        let body = r#"{"meta":{"code":200},"response":{"days":[]}}"#;
        match HolidayListing::from_response_body(body, &query()) {
            Err(LookupError::Shape { reason, raw }) => {
                assert!(reason.contains("holidays"));
                assert_eq!(raw, body);
            }
            other => panic!("expected shape error, got {:?}", other),
        }

        let err = HolidayListing::from_response_body("<html>", &query()).unwrap_err();
        assert!(err.to_string().ends_with("Raw Response: <html>"));
    }

    #[test]
    fn test_contains_is_exact() {
        let listing = HolidayListing::new(
            &query(),
            vec![HolidayRecord {
                name: "Christmas".into(),
                iso_date: "2024-12-25".into(),
            }],
        );

        assert!(listing.contains("2024-12-25", "Christmas"));
        assert!(!listing.contains("2024-12-25", "christmas"));
        assert!(!listing.contains("2024-12-24", "Christmas"));
    }
}
