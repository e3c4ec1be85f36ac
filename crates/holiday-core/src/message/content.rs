use crate::error::{Error, Result};
use crate::utils::encode_base64;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Source {
    Base64 { data: String },
    Url { url: Url },
}

impl Source {
    pub fn base64(data: impl Into<String>) -> Self {
        Self::Base64 { data: data.into() }
    }

    pub fn url(url: Url) -> Self {
        Self::Url { url }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageContent {
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl ImageContent {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            media_type: None,
        }
    }

    /// Reads an image from disk and embeds it as base64.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let media_type = media_type_for(path).ok_or_else(|| {
            Error::invalid_input(
                "image",
                format!("unsupported image type: {}", path.display()),
            )
        })?;
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(Error::invalid_input(
                "image",
                format!("image file is empty: {}", path.display()),
            ));
        }
        Ok(Self::new(Source::base64(encode_base64(&bytes))).with_media_type(media_type))
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Renders the image the way chat endpoints accept it in `image_url` parts.
    pub fn data_url(&self) -> String {
        match &self.source {
            Source::Base64 { data } => {
                let media_type = self.media_type.as_deref().unwrap_or("image/png");
                format!("data:{};base64,{}", media_type, data)
            }
            Source::Url { url } => url.to_string(),
        }
    }
}

fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
}

impl ToolUse {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(tool_use_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: error.into(),
            is_error: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Image(ImageContent),
    ToolUse(ToolUse),
    ToolResult(ToolResult),
}

impl ContentBlock {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { text: s.into() }
    }

    pub fn image(content: ImageContent) -> Self {
        Self::Image(content)
    }

    pub fn tool_use(tool_use: ToolUse) -> Self {
        Self::ToolUse(tool_use)
    }

    pub fn tool_result(result: ToolResult) -> Self {
        Self::ToolResult(result)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    pub fn is_tool_use(&self) -> bool {
        matches!(self, Self::ToolUse(_))
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, Self::ToolResult(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn as_tool_use(&self) -> Option<&ToolUse> {
        match self {
            Self::ToolUse(tu) => Some(tu),
            _ => None,
        }
    }

    pub fn as_tool_result(&self) -> Option<&ToolResult> {
        match self {
            Self::ToolResult(tr) => Some(tr),
            _ => None,
        }
    }
}
