mod tool;

pub use tool::{Tool, ToolOutput};
