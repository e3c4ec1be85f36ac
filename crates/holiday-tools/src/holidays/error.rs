use thiserror::Error;

/// Every way a holiday lookup can fail. The `Display` text is exactly what
/// the model reads as the tool result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Error: Invalid year format. Please use 'country_code,year' (e.g., 'US,2024').")]
    InvalidFormat,

    #[error("Error: Calendarific API only supports years up to {max_year}.")]
    YearOutOfRange { year: i32, max_year: i32 },

    #[error("Error communicating with Calendarific API: {0}")]
    Transport(String),

    #[error("API Error: {code} - {error_type}")]
    Api { code: i64, error_type: String },

    #[error("Error parsing Calendarific API response: {reason}. Raw Response: {raw}")]
    Shape { reason: String, raw: String },
}

/// Failure to obtain a 2xx body from the holiday API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{0}")]
    Request(String),

    #[error("HTTP status {0}")]
    Status(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key.
        FetchError::Request(e.without_url().to_string())
    }
}

impl From<FetchError> for LookupError {
    fn from(e: FetchError) -> Self {
        LookupError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            LookupError::InvalidFormat.to_string(),
            "Error: Invalid year format. Please use 'country_code,year' (e.g., 'US,2024')."
        );
        assert_eq!(
            LookupError::YearOutOfRange {
                year: 2050,
                max_year: 2049
            }
            .to_string(),
            "Error: Calendarific API only supports years up to 2049."
        );
        assert_eq!(
            LookupError::Api {
                code: 401,
                error_type: "auth failed".into()
            }
            .to_string(),
            "API Error: 401 - auth failed"
        );
    }

    #[test]
    fn test_fetch_error_becomes_transport() {
        let err: LookupError = FetchError::Status("503 Service Unavailable".into()).into();
        assert_eq!(
            err.to_string(),
            "Error communicating with Calendarific API: HTTP status 503 Service Unavailable"
        );
    }
}
