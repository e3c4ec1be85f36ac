pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod tool;
pub mod types;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};
pub use message::{ContentBlock, ImageContent, Message, Role};
pub use tool::{ToolDefinition, ToolParameter};
pub use types::{Id, MessageId, RequestId, Timestamp};

pub mod prelude {
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::Config;
    pub use crate::context::Context;
    pub use crate::error::{Error, Result};
    pub use crate::message::{ContentBlock, ImageContent, Message, Role};
    pub use crate::tool::{ToolDefinition, ToolParameter};
    pub use crate::types::{Id, MessageId, RequestId, Timestamp};
}
