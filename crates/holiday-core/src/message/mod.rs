mod content;
mod message;
mod role;

pub use content::*;
pub use message::Message;
pub use role::Role;
