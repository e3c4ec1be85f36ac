#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::{provider_from_config, OpenAiProvider};
