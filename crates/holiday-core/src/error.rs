use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },
}

impl Error {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig(key.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::missing_config("llm.api_key").to_string(),
            "Missing required config: llm.api_key"
        );
        assert_eq!(
            Error::invalid_input("image", "empty").to_string(),
            "Invalid input: image - empty"
        );
    }
}
